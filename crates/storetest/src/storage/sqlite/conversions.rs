//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use storetest_core::item::Item;

/// Convert a SQLite row to an Item.
///
/// Expected columns: id, title, note, image_path, created_at
pub fn row_to_item(row: &Row) -> rusqlite::Result<Item> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let note: Option<String> = row.get(2)?;
    let image_path: Option<String> = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(Item {
        id,
        title,
        note,
        image_path,
        created_at: parse_datetime(4, &created_at)?,
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime for SQLite storage.
///
/// Microsecond precision with an explicit `+00:00` offset,
/// e.g. `2024-01-05T12:00:00.000000+00:00`.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}
