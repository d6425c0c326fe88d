use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, NaiveDateTime, Utc};
use futures::future;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::models::event::{Event, EventCategory};
use crate::models::user::Creator;
use crate::repo;
use crate::repo::events::{EventWithCreator, NewEvent};
use crate::state::AppState;
use crate::storage::{mime_extension, CoverStore, DEFAULT_URL_TTL};
use crate::utils::error::AppError;
use crate::utils::response;

/// Event record as returned by the read endpoints: the row itself plus a
/// signed display URL and the creator identity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub image_url: Option<String>,
    pub creator: Creator,
}

async fn enrich(covers: &dyn CoverStore, row: EventWithCreator) -> Result<EnrichedEvent, AppError> {
    let image_url = if row.event.image.is_empty() {
        None
    } else {
        Some(
            covers
                .signed_read_url(&row.event.image, DEFAULT_URL_TTL)
                .await?,
        )
    };

    let creator = Creator {
        id: row.event.creator_id.clone(),
        name: row.creator_name,
        image: row.creator_image,
    };

    Ok(EnrichedEvent {
        event: row.event,
        image_url,
        creator,
    })
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn page_bounds(params: &ListParams) -> (i64, i64) {
    let limit = params.limit.unwrap_or(10).max(0);
    let offset = params.offset.unwrap_or(0).max(0);
    (limit, offset)
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<EnrichedEvent>>, AppError> {
    let (limit, offset) = page_bounds(&params);

    let rows = repo::events::list_active(&state.pool, limit, offset).await?;

    // URL signing fans out across the page; try_join_all keeps row order.
    let enriched = future::try_join_all(
        rows.into_iter()
            .map(|row| enrich(state.covers.as_ref(), row)),
    )
    .await?;

    Ok(Json(enriched))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrichedEvent>, AppError> {
    let row = repo::events::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {id} not found")))?;

    Ok(Json(enrich(state.covers.as_ref(), row).await?))
}

/// Validated multipart submission for the create endpoint.
#[derive(Debug)]
struct Submission {
    title: String,
    description: Option<String>,
    location: String,
    category: EventCategory,
    starts_at: DateTime<Utc>,
    image_bytes: Vec<u8>,
    image_mime: String,
}

/// Create-event workflow: session is resolved by the `CurrentUser`
/// extractor before anything else, then the submission is validated, the
/// cover is stored, and finally the row is inserted referencing the stored
/// key. There is no transaction across the bucket and the database; on an
/// insert failure the freshly stored cover is deleted best-effort.
pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;

    let cover_key = state
        .covers
        .store(&user.id, submission.image_bytes, &submission.image_mime)
        .await?;

    let new_event = NewEvent {
        id: Uuid::new_v4().to_string(),
        title: submission.title,
        description: submission.description,
        location: submission.location,
        image: cover_key.clone(),
        category: submission.category,
        starts_at: submission.starts_at,
        ends_at: None,
        creator_id: user.id.clone(),
    };

    match repo::events::insert(&state.pool, &new_event).await {
        Ok(event) => {
            tracing::info!(event_id = %event.id, creator = %user.id, "event created");
            Ok(response::created(event.id))
        }
        Err(e) => {
            if let Err(del_err) = state.covers.delete(&cover_key).await {
                tracing::warn!(key = %cover_key, error = %del_err, "orphaned cover not deleted");
            }
            Err(AppError::Database(e))
        }
    }
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut title = None;
    let mut description = None;
    let mut location = None;
    let mut category = None;
    let mut starts_at = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(field.text().await?),
            "description" => description = Some(field.text().await?),
            "location" => location = Some(field.text().await?),
            "category" => category = Some(field.text().await?),
            "startsAt" => starts_at = Some(field.text().await?),
            "image" => {
                let mime = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                image = Some((bytes, mime));
            }
            _ => {}
        }
    }

    validate_submission(ValidationInput {
        title,
        description,
        location,
        category,
        starts_at,
        image,
        now: Utc::now(),
    })
}

struct ValidationInput {
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    category: Option<String>,
    starts_at: Option<String>,
    image: Option<(Vec<u8>, String)>,
    now: DateTime<Utc>,
}

fn validate_submission(input: ValidationInput) -> Result<Submission, AppError> {
    let title = required_text("title", input.title)?;
    let location = required_text("location", input.location)?;

    let category = required_text("category", input.category)?
        .parse::<EventCategory>()
        .map_err(|e| AppError::Validation(format!("Invalid category: {}", e.0)))?;

    let starts_at = parse_starts_at(&required_text("startsAt", input.starts_at)?)?;
    if starts_at <= input.now {
        return Err(AppError::Validation(
            "startsAt must be in the future".to_string(),
        ));
    }

    let (image_bytes, image_mime) = input
        .image
        .ok_or_else(|| AppError::Validation("Missing required field: image".to_string()))?;
    if image_bytes.is_empty() {
        return Err(AppError::Validation("Submitted image is empty".to_string()));
    }
    if mime_extension(&image_mime).is_none() {
        return Err(AppError::Validation(format!(
            "Invalid image type: {image_mime}"
        )));
    }

    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(Submission {
        title,
        description,
        location,
        category,
        starts_at,
        image_bytes,
        image_mime,
    })
}

fn required_text(field: &str, value: Option<String>) -> Result<String, AppError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    value.ok_or_else(|| AppError::Validation(format!("Missing required field: {field}")))
}

/// Accepts RFC 3339, or the bare `YYYY-MM-DDTHH:MM[:SS]` an HTML
/// datetime-local input emits, interpreted as UTC.
fn parse_starts_at(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(AppError::Validation(format!(
        "Invalid startsAt timestamp: {raw}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn valid_input(now: DateTime<Utc>) -> ValidationInput {
        ValidationInput {
            title: Some("Torneo de ajedrez".to_string()),
            description: Some("Abierto a todos".to_string()),
            location: Some("Parque Central".to_string()),
            category: Some("ajedrez".to_string()),
            starts_at: Some((now + Duration::days(7)).to_rfc3339()),
            image: Some((vec![0x89, 0x50], "image/png".to_string())),
            now,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn valid_submission_passes() {
        let submission = validate_submission(valid_input(now())).unwrap();
        assert_eq!(submission.title, "Torneo de ajedrez");
        assert_eq!(submission.category, EventCategory::Ajedrez);
        assert_eq!(submission.image_mime, "image/png");
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut input = valid_input(now());
        input.title = Some("   ".to_string());
        let err = validate_submission(input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn past_starts_at_is_rejected() {
        let now = now();
        let mut input = valid_input(now);
        input.starts_at = Some((now - Duration::hours(1)).to_rfc3339());
        let err = validate_submission(input).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("future")));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut input = valid_input(now());
        input.category = Some("gastronomia".to_string());
        let err = validate_submission(input).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("category")));
    }

    #[test]
    fn unsupported_mime_is_rejected() {
        let mut input = valid_input(now());
        input.image = Some((vec![1, 2, 3], "image/gif".to_string()));
        let err = validate_submission(input).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("image type")));
    }

    #[test]
    fn missing_image_is_rejected() {
        let mut input = valid_input(now());
        input.image = None;
        let err = validate_submission(input).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("image")));
    }

    #[test]
    fn blank_description_becomes_none() {
        let mut input = valid_input(now());
        input.description = Some("  ".to_string());
        let submission = validate_submission(input).unwrap();
        assert_eq!(submission.description, None);
    }

    #[test]
    fn datetime_local_format_is_accepted_as_utc() {
        let parsed = parse_starts_at("2026-06-01T18:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 6, 1, 18, 30, 0).unwrap());

        let parsed = parse_starts_at("2026-06-01T18:30:15").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 6, 1, 18, 30, 15).unwrap());
    }

    #[test]
    fn rfc3339_offset_is_normalized_to_utc() {
        let parsed = parse_starts_at("2026-06-01T18:30:00-03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 6, 1, 21, 30, 0).unwrap());
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(parse_starts_at("next tuesday").is_err());
    }

    #[test]
    fn page_bounds_default_to_ten_and_zero() {
        let (limit, offset) = page_bounds(&ListParams {
            limit: None,
            offset: None,
        });
        assert_eq!((limit, offset), (10, 0));
    }

    #[test]
    fn negative_page_bounds_are_clamped() {
        let (limit, offset) = page_bounds(&ListParams {
            limit: Some(-5),
            offset: Some(-1),
        });
        assert_eq!((limit, offset), (0, 0));
    }

    // There is no idempotency key: identical submissions mint fresh event
    // ids and fresh cover keys every time. Asserted here so a future dedup
    // change has to be deliberate.
    #[tokio::test]
    async fn identical_submissions_mint_distinct_identities() {
        use crate::storage::MemoryCoverStore;

        let covers = MemoryCoverStore::new();
        let first_key = covers
            .store("u1", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();
        let second_key = covers
            .store("u1", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();
        assert_ne!(first_key, second_key);
        assert_eq!(covers.object_count(), 2);

        let first_id = Uuid::new_v4().to_string();
        let second_id = Uuid::new_v4().to_string();
        assert_ne!(first_id, second_id);
    }

    #[tokio::test]
    async fn enrich_signs_url_and_nests_creator() {
        use crate::models::event::EventStatus;
        use crate::storage::MemoryCoverStore;

        let covers = MemoryCoverStore::new();
        let key = covers
            .store("u1", vec![1, 2], "image/jpeg")
            .await
            .unwrap();

        let row = EventWithCreator {
            event: Event {
                id: "e1".into(),
                title: "Torneo".into(),
                description: None,
                location: "Rosario".into(),
                image: key.clone(),
                status: EventStatus::Active,
                category: EventCategory::Ajedrez,
                event_verified: false,
                starts_at: Utc::now(),
                ends_at: None,
                creator_id: "u1".into(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            creator_name: "Ana".into(),
            creator_image: None,
        };

        let enriched = enrich(&covers, row).await.unwrap();
        assert!(enriched.image_url.unwrap().contains(&key));
        assert_eq!(enriched.creator.id, "u1");
        assert_eq!(enriched.creator.name, "Ana");
    }
}
