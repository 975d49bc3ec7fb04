//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - everything else -> 500 (Internal Server Error)
///
/// Stored rows are never caller-supplied identifiers, so no variant maps to
/// a 4xx.
///
/// # Examples
///
/// ```
/// use storetest_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::ConnectionFailed("unable to open database file".to_string());
/// assert_eq!(repository_error_to_status_code(&error), 503);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::ConstraintViolation { .. } => 500,
        RepositoryError::InvalidData(_) => 500,
    }
}
