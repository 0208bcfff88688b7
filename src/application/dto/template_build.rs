//! Template build tracking - Status records for queued seat template builds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::dto::SeatTemplateSummary;
use crate::domain::value_objects::{HallId, TemplateBuildId};

/// Lifecycle of a queued template build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TemplateBuildStatus {
    Pending,
    Processing,
    Completed { summary: SeatTemplateSummary },
    Failed { error: String },
}

impl TemplateBuildStatus {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            TemplateBuildStatus::Completed { .. } | TemplateBuildStatus::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBuildRecord {
    pub id: TemplateBuildId,
    pub hall_id: HallId,
    #[serde(flatten)]
    pub status: TemplateBuildStatus,
    pub submitted_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl TemplateBuildRecord {
    pub fn pending(hall_id: HallId) -> Self {
        Self {
            id: TemplateBuildId::new(),
            hall_id,
            status: TemplateBuildStatus::Pending,
            submitted_at: Utc::now(),
            finished_at: None,
        }
    }
}

/// Response for an accepted build submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBuildAcceptedDto {
    pub build_id: TemplateBuildId,
    pub hall_id: HallId,
}
