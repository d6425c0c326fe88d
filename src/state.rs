use std::sync::Arc;

use sqlx::PgPool;

use crate::storage::CoverStore;

/// Shared per-process state: the connection pool and the cover store, both
/// constructed once in `main` and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub covers: Arc<dyn CoverStore>,
}

impl AppState {
    pub fn new(pool: PgPool, covers: Arc<dyn CoverStore>) -> Self {
        Self { pool, covers }
    }
}
