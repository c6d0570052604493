use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::BlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: playhub_db::DbPool,
    /// Server configuration (JWT settings, upload limits).
    pub config: Arc<ServerConfig>,
    /// Where uploaded game assets are written.
    pub blobs: Arc<dyn BlobStore>,
}
