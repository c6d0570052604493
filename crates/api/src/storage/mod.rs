//! Blob storage for uploaded game assets.
//!
//! Handlers talk to storage only through the object-safe [`BlobStore`]
//! trait held in [`AppState`](crate::state::AppState), so tests can swap in
//! an in-memory store with injected failures.

mod local;

pub use local::LocalBlobStore;

use async_trait::async_trait;

/// Errors raised by a [`BlobStore`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Path is absolute, empty, or escapes the store root.
    #[error("Invalid storage path '{0}'")]
    InvalidPath(String),

    /// Blobs are write-once; the path is already taken.
    #[error("Blob already exists at '{0}'")]
    AlreadyExists(String),

    #[error("Storage I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Content storage addressed by slash-separated relative paths.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` at `path`. Never overwrites an existing blob.
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Public locator for `path`. Pure; does not check existence.
    fn url(&self, path: &str) -> String;

    /// Remove `path` and everything below it. Missing directories are not an error.
    async fn delete_directory(&self, path: &str) -> Result<(), StorageError>;
}

/// Reject paths that are empty, absolute, or contain empty, `.` or `..` segments.
pub fn validate_blob_path(path: &str) -> Result<(), StorageError> {
    let valid = !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidPath(path.to_string()))
    }
}

/// Join a public prefix and a blob path with exactly one `/` between them.
pub fn public_url(prefix: &str, path: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), path)
}
