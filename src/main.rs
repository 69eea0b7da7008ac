use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;

mod app;
mod auth;
mod config;
mod error;
mod plants;
mod routes;
mod state;
mod views;

#[cfg(test)]
mod testing;

use crate::config::AppConfig;
use crate::state::{AppState, Pools};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "plantepedia=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    let key = config.session.signing_key()?;
    let pools = Pools::connect(&config).await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&pools.users).await {
        tracing::warn!(error = %e, "users migration failed; continuing");
    }

    let session_store = PostgresStore::new(pools.users.clone());
    session_store
        .migrate()
        .await
        .context("migrate session store")?;
    tokio::spawn(
        session_store
            .clone()
            .continuously_delete_expired(SESSION_SWEEP_INTERVAL),
    );

    let state = AppState::init(config.clone(), &pools)?;
    let app = app::build_app(state, session_store, key);
    app::serve(app, &config).await
}

