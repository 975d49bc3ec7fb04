use async_trait::async_trait;

use crate::item::{Item, NewItem};

use super::Result;

/// Repository for item operations.
///
/// Items are append-only: there is no update or delete.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Creates the item table if it does not exist yet. Idempotent.
    async fn ensure_schema(&self) -> Result<()>;

    /// Gets every item, newest (highest id) first.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Appends a new item. The store assigns its id.
    async fn insert_item(&self, item: &NewItem) -> Result<()>;
}
