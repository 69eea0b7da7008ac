use std::sync::Arc;

use tracing::debug;

use crate::plants::{repo::PlantStore, repo_types::PlantSummary};

#[derive(Clone)]
pub struct PlantService {
    plants: Arc<dyn PlantStore>,
}

impl PlantService {
    pub fn new(plants: Arc<dyn PlantStore>) -> Self {
        Self { plants }
    }

    /// Every summary, unfiltered and in store order.
    pub async fn list_summaries(&self) -> anyhow::Result<Vec<PlantSummary>> {
        let summaries = self.plants.list_summaries().await?;
        debug!(count = summaries.len(), "plant summaries loaded");
        Ok(summaries)
    }
}
