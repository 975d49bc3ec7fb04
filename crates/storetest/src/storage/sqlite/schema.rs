//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create the items table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    note TEXT,
    image_path TEXT,
    created_at TEXT NOT NULL
);
"#;

pub const INSERT_ITEM: &str = r#"
INSERT INTO items (title, note, image_path, created_at)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_ITEMS_NEWEST_FIRST: &str = r#"
SELECT id, title, note, image_path, created_at
FROM items
ORDER BY id DESC
"#;
