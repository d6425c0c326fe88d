use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::event::{Event, EventCategory};

/// Fields of an event row to be inserted. Status, verification flag and
/// timestamps take their database defaults.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub image: String,
    pub category: EventCategory,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub creator_id: String,
}

/// One event row joined with its creator.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithCreator {
    #[sqlx(flatten)]
    pub event: Event,
    pub creator_name: String,
    pub creator_image: Option<String>,
}

const EVENT_WITH_CREATOR_COLUMNS: &str = "\
    e.id, e.title, e.description, e.location, e.image, e.status, e.category, \
    e.event_verified, e.starts_at, e.ends_at, e.creator_id, e.created_at, e.updated_at, \
    u.name AS creator_name, u.image AS creator_image";

pub async fn insert(pool: &PgPool, new_event: &NewEvent) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (id, title, description, location, image, category, starts_at, ends_at, creator_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, title, description, location, image, status, category,
                  event_verified, starts_at, ends_at, creator_id, created_at, updated_at
        "#,
    )
    .bind(&new_event.id)
    .bind(&new_event.title)
    .bind(&new_event.description)
    .bind(&new_event.location)
    .bind(&new_event.image)
    .bind(new_event.category)
    .bind(new_event.starts_at)
    .bind(new_event.ends_at)
    .bind(&new_event.creator_id)
    .fetch_one(pool)
    .await
}

/// Active events joined with their creators, ordered by start time (id as a
/// tiebreaker) so limit/offset pagination is stable.
pub async fn list_active(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<EventWithCreator>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {EVENT_WITH_CREATOR_COLUMNS}
        FROM events e
        INNER JOIN users u ON u.id = e.creator_id
        WHERE e.status = 'active'
        ORDER BY e.starts_at ASC, e.id ASC
        LIMIT $1 OFFSET $2
        "#
    );

    sqlx::query_as::<_, EventWithCreator>(&query)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<EventWithCreator>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {EVENT_WITH_CREATOR_COLUMNS}
        FROM events e
        INNER JOIN users u ON u.id = e.creator_id
        WHERE e.id = $1
        "#
    );

    sqlx::query_as::<_, EventWithCreator>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}
