//! Stage transition records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::ModelStage;

/// One recorded stage change of a model version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    pub model_name: String,
    pub version: u32,
    pub from_stage: ModelStage,
    pub to_stage: ModelStage,
    pub timestamp: DateTime<Utc>,
    /// Who requested the change
    pub user: Option<String>,
}
