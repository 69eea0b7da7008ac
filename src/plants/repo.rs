use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::plants::repo_types::PlantSummary;

/// Read-only access to the plant encyclopedia.
#[async_trait]
pub trait PlantStore: Send + Sync {
    async fn list_summaries(&self) -> anyhow::Result<Vec<PlantSummary>>;
}

/// `plant_summary` in the content database, maintained outside this service.
#[derive(Clone)]
pub struct PgPlantStore {
    db: PgPool,
}

impl PgPlantStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlantStore for PgPlantStore {
    async fn list_summaries(&self) -> anyhow::Result<Vec<PlantSummary>> {
        let rows = sqlx::query_as::<_, PlantSummary>(
            r#"
            SELECT plant_name, summary, "type", season, difficulty, nutrition
              FROM plant_summary
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list plant summaries")?;
        Ok(rows)
    }
}
