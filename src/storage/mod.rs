//! Cover-image object storage.
//!
//! Covers live in a private bucket under `covers/<owner>/<random>.<ext>`;
//! the relational rows only ever hold the key. Reads go through short-lived
//! presigned URLs issued on demand, one fresh URL per request.

mod memory;
mod s3;

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::utils::error::AppError;

pub use memory::MemoryCoverStore;
pub use s3::S3CoverStore;

/// Default validity of a signed read URL.
pub const DEFAULT_URL_TTL: Duration = Duration::from_secs(3600);

const MIME_TO_EXT: [(&str, &str); 3] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Maps a supported image MIME type to its file extension.
pub fn mime_extension(mime_type: &str) -> Option<&'static str> {
    MIME_TO_EXT
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, ext)| *ext)
}

/// Builds a fresh storage key for `owner_id`, or rejects the MIME type
/// before any I/O happens.
pub fn new_cover_key(owner_id: &str, mime_type: &str) -> Result<String, AppError> {
    let ext = mime_extension(mime_type)
        .ok_or_else(|| AppError::Validation(format!("Invalid image type: {mime_type}")))?;
    Ok(format!("covers/{owner_id}/{}.{ext}", Uuid::new_v4()))
}

#[async_trait]
pub trait CoverStore: Send + Sync {
    /// Stores the cover bytes and returns the generated key.
    async fn store(
        &self,
        owner_id: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, AppError>;

    /// Issues a time-limited read URL for an existing key. No caching;
    /// every call carries a fresh expiry.
    async fn signed_read_url(&self, key: &str, ttl: Duration) -> Result<String, AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;
}
