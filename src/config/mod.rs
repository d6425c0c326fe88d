use std::env;
use std::net::SocketAddr;

pub mod cors;

pub use cors::create_cors_layer;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_db_connections: u32,
    pub storage: StorageConfig,
}

/// Settings for the covers bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible providers; AWS when unset.
    pub endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3001)));

        Self {
            // No fallback: a misconfigured deployment must not silently
            // point at some default database.
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr,
            max_db_connections: env::var("MAX_DB_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            storage: StorageConfig::from_env(),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            bucket: env::var("BUCKET_NAME").unwrap_or_else(|_| "eventia-covers".to_string()),
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
        }
    }
}
