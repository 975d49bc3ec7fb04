//! SQLite repository implementation.
//!
//! Implements [`ItemRepository`] from `storetest_core::storage` using SQLite.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use storetest_core::item::{Item, NewItem};
use storetest_core::storage::{ItemRepository, Result};

use super::conversions::{format_datetime, row_to_item};
use super::error::{map_open_error, map_tokio_rusqlite_error};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Every operation opens its own connection to the database file; nothing is
/// pooled or held between requests.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    path: PathBuf,
}

impl SqliteRepository {
    /// Creates a new repository backed by the file at `path`.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Self {
            path: path.as_ref().to_path_buf(),
        };

        repo.ensure_schema().await?;

        Ok(repo)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).await.map_err(map_open_error)
    }
}

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect().await?;

        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, "Item"))
    }

    async fn list_items(&self) -> Result<Vec<Item>> {
        let conn = self.connect().await?;

        conn.call(|conn| {
            let mut stmt = conn
                .prepare(schema::SELECT_ITEMS_NEWEST_FIRST)
                .map_err(wrap_err)?;
            let rows = stmt.query_map([], row_to_item).map_err(wrap_err)?;

            let mut items = Vec::new();
            for row_result in rows {
                items.push(row_result.map_err(wrap_err)?);
            }
            Ok(items)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, "Item"))
    }

    async fn insert_item(&self, item: &NewItem) -> Result<()> {
        let title = item.title.clone();
        let note = item.note.clone();
        let image_path = item.image_path.clone();
        let created_at = format_datetime(&item.created_at);

        let conn = self.connect().await?;

        conn.call(move |conn| {
            conn.execute(
                schema::INSERT_ITEM,
                rusqlite::params![title, note, image_path, created_at],
            )
            .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, "Item"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use storetest_core::storage::RepositoryError;
    use tempfile::TempDir;

    async fn repo() -> (TempDir, SqliteRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepository::new(dir.path().join("db.sqlite"))
            .await
            .unwrap();
        (dir, repo)
    }

    fn new_item(title: &str) -> NewItem {
        NewItem {
            title: title.to_string(),
            note: None,
            image_path: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_new_creates_database_file() {
        let (dir, repo) = repo().await;

        assert!(dir.path().join("db.sqlite").exists());
        assert_eq!(repo.path(), dir.path().join("db.sqlite"));
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let (_dir, repo) = repo().await;
        repo.insert_item(&new_item("kept")).await.unwrap();

        repo.ensure_schema().await.unwrap();
        repo.ensure_schema().await.unwrap();

        assert_eq!(repo.list_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let (_dir, repo) = repo().await;

        assert!(repo.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_list_round_trip() {
        let (_dir, repo) = repo().await;
        let created_at = Utc::now();

        repo.insert_item(&NewItem {
            title: "Cat".to_string(),
            note: Some("fluffy".to_string()),
            image_path: Some("20240105000000000000-cat.png".to_string()),
            created_at,
        })
        .await
        .unwrap();

        let items = repo.list_items().await.unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.id, 1);
        assert_eq!(item.title, "Cat");
        assert_eq!(item.note.as_deref(), Some("fluffy"));
        assert_eq!(
            item.image_path.as_deref(),
            Some("20240105000000000000-cat.png")
        );
        // Stored with microsecond precision
        assert!((item.created_at - created_at).abs() < Duration::milliseconds(1));
    }

    #[tokio::test]
    async fn test_list_items_newest_first() {
        let (_dir, repo) = repo().await;
        let now = Utc::now();

        // Timestamps deliberately out of order: ordering follows the id
        for (title, offset) in [("first", 0), ("second", -3600), ("third", 3600)] {
            let mut item = new_item(title);
            item.created_at = now + Duration::seconds(offset);
            repo.insert_item(&item).await.unwrap();
        }

        let items = repo.list_items().await.unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();

        assert_eq!(titles, ["third", "second", "first"]);
        assert_eq!(ids, [3, 2, 1]);
    }

    #[tokio::test]
    async fn test_items_survive_reopen() {
        let (dir, repo) = repo().await;
        repo.insert_item(&new_item("persisted")).await.unwrap();

        let reopened = SqliteRepository::new(dir.path().join("db.sqlite"))
            .await
            .unwrap();

        let items = reopened.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "persisted");
    }

    #[tokio::test]
    async fn test_open_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("db.sqlite");

        let result = SqliteRepository::new(path).await;

        assert!(matches!(result, Err(RepositoryError::ConnectionFailed(_))));
    }
}
