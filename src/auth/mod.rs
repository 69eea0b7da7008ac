use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod session;
pub mod validation;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::signup_routes())
        .merge(handlers::login_routes())
}
