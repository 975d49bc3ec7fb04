//! Application state.
//!
//! This module defines the shared application state that is passed to all
//! request handlers: the item repository, the upload directory and the
//! configuration they were built from.

use std::sync::Arc;

use anyhow::Context;

use storetest_core::storage::ItemRepository;

use crate::{config::Config, storage::SqliteRepository, uploads::UploadStore};

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Item repository (SQLite, one connection per operation).
    pub items: Arc<dyn ItemRepository>,
    /// Upload directory.
    pub uploads: Arc<UploadStore>,
    /// Configuration the state was built from.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates an AppState with the given repository and configuration.
    pub fn build(items: Arc<dyn ItemRepository>, config: &Config) -> Self {
        Self {
            items,
            uploads: Arc::new(UploadStore::new(&config.upload_dir)),
            config: Arc::new(config.clone()),
        }
    }

    /// Runs the startup step and creates the AppState.
    ///
    /// Creates the database and upload directories, then makes sure the
    /// schema exists. Runs once, before the listener accepts connections.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let db_dir = config.db_dir();
        tokio::fs::create_dir_all(&db_dir)
            .await
            .with_context(|| format!("creating database directory {}", db_dir.display()))?;
        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .with_context(|| {
                format!("creating upload directory {}", config.upload_dir.display())
            })?;

        let repo = SqliteRepository::new(&config.db_path)
            .await
            .with_context(|| format!("opening database {}", config.db_path.display()))?;

        tracing::info!(
            db_path = %repo.path().display(),
            upload_dir = %config.upload_dir.display(),
            "Storage ready"
        );

        Ok(Self::build(Arc::new(repo), config))
    }
}
