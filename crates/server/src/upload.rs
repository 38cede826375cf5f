//! Upload store for product images.
//!
//! Files are written under a configured directory with collision-resistant
//! UUIDv4 names preserving the original extension, and served statically at
//! `/uploads/`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Public URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Filesystem error while creating the directory or writing the file.
    #[error("upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload: where it lives on disk and how clients reach it.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Filesystem path of the written file.
    pub file_path: PathBuf,
    /// Public-relative URL recorded in the database (e.g. `/uploads/<uuid>.png`).
    pub public_path: String,
}

/// Stores uploaded product images under a configured directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a new upload store rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` under a generated unique name preserving the original
    /// extension.
    ///
    /// Two concurrent saves of the same original filename cannot collide
    /// because the stored name is a fresh UUIDv4.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the directory cannot be created or the
    /// file cannot be written.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredUpload, UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stored_name = match extension(original_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let file_path = self.dir.join(&stored_name);
        tokio::fs::write(&file_path, bytes).await?;

        Ok(StoredUpload {
            file_path,
            public_path: format!("{PUBLIC_PREFIX}/{stored_name}"),
        })
    }

    /// Best-effort removal of a previously stored file.
    ///
    /// Used to clean up after a failed insert so the recorded-path invariant
    /// holds; a removal failure is logged, not propagated.
    pub async fn remove(&self, stored: &StoredUpload) {
        if let Err(e) = tokio::fs::remove_file(&stored.file_path).await {
            tracing::warn!(
                path = %stored.file_path.display(),
                error = %e,
                "Failed to remove orphaned upload"
            );
        }
    }
}

/// Extension of the original filename, if any.
fn extension(original_name: &str) -> Option<&str> {
    Path::new(original_name).extension().and_then(|e| e.to_str())
}
