use axum::{extract::State, response::Html, routing::get, Router};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    auth::session,
    error::AppError,
    state::AppState,
    views::{render, View},
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/settings", get(settings))
        .route("/community", get(community))
}

/// Home for signed-in users, landing page for everyone else.
#[instrument(skip(state, session))]
pub async fn landing(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    match session::current_user(&session).await? {
        Some(user) => render(
            &state,
            View::Home,
            json!({ "username": user.username, "email": user.email }),
        ),
        None => render(&state, View::Landing, json!({})),
    }
}

pub async fn settings(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, View::Settings, json!({}))
}

pub async fn community(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, View::Community, json!({}))
}
