//! Filesystem-backed [`BlobStore`].

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::{public_url, validate_blob_path, BlobStore, StorageError};

/// Stores blobs as files below `root`. Public URLs are `{public_prefix}/{path}`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_blob_path(path)?;
        Ok(self.root.join(path))
    }
}

fn io_error(path: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_string(),
        source,
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(path, e))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_string()),
                _ => io_error(path, e),
            })?;
        file.write_all(data).await.map_err(|e| io_error(path, e))?;
        file.sync_all().await.map_err(|e| io_error(path, e))?;

        tracing::debug!(path, bytes = data.len(), "Stored blob");
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let target = self.resolve(path)?;
        tokio::fs::try_exists(&target)
            .await
            .map_err(|e| io_error(path, e))
    }

    fn url(&self, path: &str) -> String {
        public_url(&self.public_prefix, path)
    }

    async fn delete_directory(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_dir_all(&target).await {
            Ok(()) => {
                tracing::debug!(path, "Removed blob directory");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(path, e)),
        }
    }
}
