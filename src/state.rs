use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::{password::Hasher, repo::PgUserStore, services::AuthService};
use crate::config::AppConfig;
use crate::plants::{repo::PgPlantStore, services::PlantService};
use crate::views::{HtmlViews, ViewRenderer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub plants: PlantService,
    pub views: Arc<dyn ViewRenderer>,
}

/// Connection pools opened at startup. The users pool also backs the session store.
pub struct Pools {
    pub users: PgPool,
    pub content: PgPool,
}

impl Pools {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let users = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(config.database.users_options())
            .await
            .context("connect to users database")?;
        let content = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(config.database.content_options())
            .await
            .context("connect to plantepedia database")?;
        Ok(Self { users, content })
    }
}

impl AppState {
    pub fn init(config: Arc<AppConfig>, pools: &Pools) -> anyhow::Result<Self> {
        let hasher = Hasher::new(&config.hashing)?;
        Ok(Self::from_parts(
            config,
            AuthService::new(Arc::new(PgUserStore::new(pools.users.clone())), hasher),
            PlantService::new(Arc::new(PgPlantStore::new(pools.content.clone()))),
            Arc::new(HtmlViews::load()?),
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        auth: AuthService,
        plants: PlantService,
        views: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            config,
            auth,
            plants,
            views,
        }
    }
}
