use std::{env, path::PathBuf};

/// Default location of the SQLite database file.
pub const DEFAULT_DB_PATH: &str = "./data/db.sqlite";
/// Default directory for uploaded images.
pub const DEFAULT_UPLOAD_DIR: &str = "./data/uploads";
/// Default request body limit for submissions (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "./data/db.sqlite")
    pub db_path: PathBuf,
    /// Directory uploaded images are written to (default: "./data/uploads")
    pub upload_dir: PathBuf,
    /// Maximum accepted request body size in bytes (default: 16 MiB)
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DB_PATH` - SQLite database path (default: "./data/db.sqlite")
    /// - `UPLOAD_DIR` - Upload directory (default: "./data/uploads")
    /// - `MAX_UPLOAD_BYTES` - Request body limit (default: 16 MiB)
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// Directory holding the database file, created at startup.
    pub fn db_dir(&self) -> PathBuf {
        match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
