use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The six display fields of a plant encyclopedia entry. Anything else the
/// content database holds for a plant is never read into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PlantSummary {
    pub plant_name: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub plant_type: Option<String>,
    pub season: Option<String>,
    pub difficulty: Option<String>,
    pub nutrition: Option<String>,
}
