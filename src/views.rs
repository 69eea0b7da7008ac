//! Named views and the renderer seam.
//!
//! Handlers pick a [`View`] and a JSON context; the [`ViewRenderer`] in
//! `AppState` turns them into HTML. [`HtmlViews`] is the built-in renderer:
//! the files in `templates/` are embedded in the binary and rendered with
//! minijinja, which escapes every `.html` template's output.

use anyhow::Context;
use axum::response::Html;
use minijinja::{Environment, UndefinedBehavior};
use rust_embed::RustEmbed;
use serde_json::Value;
use tracing::debug;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Home,
    Signup,
    Login,
    ResetPassword,
    Settings,
    Plantepedia,
    Community,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Landing => "landing/landing",
            View::Home => "home/home",
            View::Signup => "signup/signup",
            View::Login => "login/login",
            View::ResetPassword => "login/resetPassword",
            View::Settings => "settings/settings",
            View::Plantepedia => "plantepedia/summary/plantepedia",
            View::Community => "community/community",
        }
    }

    fn template(self) -> &'static str {
        match self {
            View::Landing => "landing.html",
            View::Home => "home.html",
            View::Signup => "signup.html",
            View::Login => "login.html",
            View::ResetPassword => "reset_password.html",
            View::Settings => "settings.html",
            View::Plantepedia => "plantepedia.html",
            View::Community => "community.html",
        }
    }
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: View, ctx: &Value) -> anyhow::Result<String>;
}

pub fn render(state: &AppState, view: View, ctx: Value) -> Result<Html<String>, AppError> {
    debug!(view = view.name(), "render");
    Ok(Html(state.views.render(view, &ctx)?))
}

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

pub struct HtmlViews {
    env: Environment<'static>,
}

impl HtmlViews {
    pub fn load() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        // A missing context key is a handler bug, not an empty string.
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for name in Templates::iter() {
            let file = Templates::get(&name)
                .with_context(|| format!("embedded template {name}"))?;
            let source = String::from_utf8(file.data.into_owned())
                .with_context(|| format!("template {name} is not utf-8"))?;
            env.add_template_owned(name.into_owned(), source)?;
        }
        Ok(Self { env })
    }
}

impl ViewRenderer for HtmlViews {
    fn render(&self, view: View, ctx: &Value) -> anyhow::Result<String> {
        let html = self.env.get_template(view.template())?.render(ctx)?;
        Ok(html)
    }
}
