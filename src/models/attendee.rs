use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Join row recording a user's attendance at an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    pub user_id: String,
    pub event_id: String,
    pub joined_at: DateTime<Utc>,
}
