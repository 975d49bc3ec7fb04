use chrono::{DateTime, Utc};
use thiserror::Error;

/// A stored submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub note: Option<String>,
    /// Stored filename inside the upload directory.
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for an item. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub note: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Errors that can occur when validating a submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Item title cannot be empty")]
    EmptyTitle,
}

/// Trims a submitted title, rejecting empty or whitespace-only input.
pub fn normalize_title(raw: Option<&str>) -> Result<String, ItemError> {
    let title = raw.unwrap_or_default().trim();
    if title.is_empty() {
        return Err(ItemError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Trims a submitted note. Empty notes become `None`.
pub fn normalize_note(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string)
}

impl NewItem {
    /// Builds an insert payload from raw form values.
    ///
    /// Fails with [`ItemError::EmptyTitle`] when the trimmed title is empty.
    pub fn from_form(
        title: Option<&str>,
        note: Option<&str>,
        image_path: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ItemError> {
        Ok(Self {
            title: normalize_title(title)?,
            note: normalize_note(note),
            image_path,
            created_at,
        })
    }
}
