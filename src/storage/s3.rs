use std::time::Duration;

use async_trait::async_trait;
use opendal::{services, Operator};

use crate::config::StorageConfig;
use crate::storage::{new_cover_key, CoverStore};
use crate::utils::error::AppError;

/// S3-backed cover store. Built once at startup and shared through the
/// application state; handlers never construct their own client.
#[derive(Clone)]
pub struct S3CoverStore {
    op: Operator,
}

impl S3CoverStore {
    pub fn new(config: &StorageConfig) -> Result<Self, opendal::Error> {
        let mut builder = services::S3::default();
        builder.bucket(&config.bucket);
        builder.region(&config.region);
        builder.access_key_id(&config.access_key_id);
        builder.secret_access_key(&config.secret_access_key);
        if let Some(endpoint) = &config.endpoint {
            builder.endpoint(endpoint);
        }

        let op = Operator::new(builder)?.finish();
        Ok(Self { op })
    }
}

#[async_trait]
impl CoverStore for S3CoverStore {
    async fn store(
        &self,
        owner_id: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, AppError> {
        // MIME check happens before any request leaves the process.
        let key = new_cover_key(owner_id, mime_type)?;
        self.op.write(&key, bytes).await?;
        Ok(key)
    }

    async fn signed_read_url(&self, key: &str, ttl: Duration) -> Result<String, AppError> {
        let presigned = self.op.presign_read(key, ttl).await?;
        Ok(presigned.uri().to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.op.delete(key).await?;
        Ok(())
    }
}
