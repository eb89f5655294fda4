//! # Upload Storage
//!
//! Writes uploaded product images to the upload directory and hands back
//! the public URL they are served under.
//!
//! ```text
//!   photo.JPG ──► {upload_dir}/3f2a...-uuid.jpg ──► /uploads/3f2a...-uuid.jpg
//! ```
//!
//! Client file names are never used on disk; only a sanitized extension
//! survives.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

/// Longest extension kept from a client file name.
const MAX_EXTENSION_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Upload storage failed: {}", err);
        ApiError::internal("Failed to store upload")
    }
}

/// Local-disk store for uploaded files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        UploadStore {
            dir: dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores `bytes` under a fresh name and returns its public URL.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "Stored upload");

        Ok(format!("{}/{}", self.public_prefix, file_name))
    }
}

/// Lower-cased alphanumeric extension of a client file name, if any.
fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
