use axum::{
    extract::State,
    response::{Html, Response},
    routing::{get, post},
    Form, Router,
};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginForm, ResetPasswordForm, SignupForm},
        services::{AuthOutcome, ResetOutcome},
        session,
    },
    error::AppError,
    routes::found,
    state::AppState,
    views::{render, View},
};

pub fn signup_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_page))
        .route("/signup/submitUser", post(submit_user))
}

pub fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/login/logging", post(logging))
        .route("/login/resetPassword", get(reset_page))
        .route("/login/reset", post(reset))
        .route("/logout", get(logout))
}

pub async fn signup_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, View::Signup, json!({}))
}

#[instrument(skip(state, session, form))]
pub async fn submit_user(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    match state.auth.signup(form).await? {
        AuthOutcome::Authenticated(user) => {
            session::establish(&session, user).await?;
            Ok(found("/"))
        }
        AuthOutcome::Rejected(_) => Ok(found("/signup")),
    }
}

pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, View::Login, json!({}))
}

#[instrument(skip(state, session, form))]
pub async fn logging(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth.login(form).await? {
        AuthOutcome::Authenticated(user) => {
            session::establish(&session, user).await?;
            Ok(found("/"))
        }
        AuthOutcome::Rejected(_) => Ok(found("/login")),
    }
}

pub async fn reset_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, View::ResetPassword, json!({}))
}

#[instrument(skip(state, form))]
pub async fn reset(
    State(state): State<AppState>,
    Form(form): Form<ResetPasswordForm>,
) -> Result<Response, AppError> {
    match state.auth.reset_password(form).await? {
        ResetOutcome::Updated(_) => Ok(found("/login")),
        ResetOutcome::Rejected(_) => Ok(found("/login/resetPassword")),
    }
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response, AppError> {
    session::destroy(&session).await?;
    Ok(found("/"))
}
