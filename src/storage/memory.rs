use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::storage::{new_cover_key, CoverStore};
use crate::utils::error::AppError;

/// In-memory cover store used by the test suite in place of the bucket.
/// Signed URLs are fabricated but carry the same key/expiry information.
#[derive(Default)]
pub struct MemoryCoverStore {
    objects: Mutex<HashMap<String, StoredCover>>,
}

#[derive(Debug, Clone)]
struct StoredCover {
    bytes: Vec<u8>,
    mime_type: String,
}

impl MemoryCoverStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn object_bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).map(|o| o.bytes.clone())
    }
}

#[async_trait]
impl CoverStore for MemoryCoverStore {
    async fn store(
        &self,
        owner_id: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, AppError> {
        let key = new_cover_key(owner_id, mime_type)?;
        self.objects.lock().unwrap().insert(
            key.clone(),
            StoredCover {
                bytes,
                mime_type: mime_type.to_string(),
            },
        );
        Ok(key)
    }

    async fn signed_read_url(&self, key: &str, ttl: Duration) -> Result<String, AppError> {
        let objects = self.objects.lock().unwrap();
        let cover = objects
            .get(key)
            .ok_or_else(|| AppError::NotFound(format!("No stored object for key {key}")))?;
        Ok(format!(
            "memory://{key}?expires={}&type={}",
            ttl.as_secs(),
            cover.mime_type
        ))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DEFAULT_URL_TTL;

    #[tokio::test]
    async fn store_then_read_url_then_delete() {
        let store = MemoryCoverStore::new();
        let key = store
            .store("user-1", vec![0xFF, 0xD8], "image/jpeg")
            .await
            .unwrap();
        assert!(store.contains(&key));
        assert_eq!(store.object_bytes(&key).unwrap(), vec![0xFF, 0xD8]);

        let url = store.signed_read_url(&key, DEFAULT_URL_TTL).await.unwrap();
        assert!(url.contains(&key));
        assert!(url.contains("expires=3600"));

        store.delete(&key).await.unwrap();
        assert!(!store.contains(&key));
    }

    #[tokio::test]
    async fn rejected_mime_leaves_store_untouched() {
        let store = MemoryCoverStore::new();
        let err = store
            .store("user-1", vec![1, 2, 3], "image/svg+xml")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.object_count(), 0);
    }

    #[tokio::test]
    async fn url_for_missing_key_is_not_found() {
        let store = MemoryCoverStore::new();
        let err = store
            .signed_read_url("covers/u/missing.png", DEFAULT_URL_TTL)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn each_signed_url_reflects_requested_ttl() {
        let store = MemoryCoverStore::new();
        let key = store
            .store("user-1", vec![1], "image/png")
            .await
            .unwrap();
        let short = store
            .signed_read_url(&key, Duration::from_secs(60))
            .await
            .unwrap();
        assert!(short.contains("expires=60"));
    }
}
