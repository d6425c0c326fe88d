use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::event::EventCancellationReason;

/// Cancellation record, at most one per event (unique constraint on
/// `event_id`). No mutating endpoint writes this yet; the schema anticipates
/// the cancellation workflow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventCancellation {
    pub id: String,
    pub event_id: String,
    pub canceled_by_user_id: String,
    pub reason: EventCancellationReason,
    pub description: Option<String>,
    pub canceled_at: DateTime<Utc>,
}
