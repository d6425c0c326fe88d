use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A request for manual verification of an event. Many per event permitted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventVerificationRequest {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub contact_email: String,
    pub contact_name: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
