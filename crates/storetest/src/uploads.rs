//! Upload directory access.
//!
//! Naming decisions live in `storetest_core::upload`; this module does the
//! filesystem work.

use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::Utc;
use thiserror::Error;

use storetest_core::upload::{accept_upload, is_servable_name};

/// Errors raised while touching the upload directory.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to write upload {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read upload {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The directory uploaded images are stored in and served from.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores an uploaded file and returns its stored name.
    ///
    /// Returns `Ok(None)` when the upload is dropped: an empty client
    /// filename, a name that sanitizes to nothing, or a disallowed extension.
    pub async fn save(
        &self,
        client_name: &str,
        bytes: &[u8],
    ) -> Result<Option<String>, UploadError> {
        if client_name.is_empty() {
            return Ok(None);
        }

        let stored_name = match accept_upload(client_name, Utc::now()) {
            Ok(name) => name,
            Err(rejection) => {
                tracing::debug!(filename = %client_name, reason = %rejection, "Dropping upload");
                return Ok(None);
            }
        };

        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| UploadError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!(stored_name = %stored_name, bytes = bytes.len(), "Stored upload");

        Ok(Some(stored_name))
    }

    /// Reads a stored file by name.
    ///
    /// Returns `Ok(None)` for names that could escape the directory and for
    /// files that do not exist.
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, UploadError> {
        if !is_servable_name(name) {
            tracing::warn!(filename = %name, "Rejected unsafe upload path");
            return Ok(None);
        }

        let path = self.dir.join(name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(UploadError::Read { path, source }),
        }

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(UploadError::Read { path, source }),
        }
    }
}
