use axum::{extract::State, response::Html, routing::get, Router};
use serde_json::json;
use tracing::instrument;

use crate::{
    error::AppError,
    state::AppState,
    views::{render, View},
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/plantepediaSummary", get(plantepedia_summary))
}

#[instrument(skip(state))]
pub async fn plantepedia_summary(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let summaries = state.plants.list_summaries().await?;
    render(&state, View::Plantepedia, json!({ "summaries": summaries }))
}
