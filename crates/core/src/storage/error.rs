use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Constraint violation on {entity_type}: {message}")]
    ConstraintViolation {
        entity_type: &'static str,
        message: String,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("unable to open database file".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: unable to open database file"
        );
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("no such table: items".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: items");
    }

    #[test]
    fn test_repository_error_constraint_violation_display() {
        let error = RepositoryError::ConstraintViolation {
            entity_type: "Item",
            message: "NOT NULL constraint failed: items.title".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Constraint violation on Item: NOT NULL constraint failed: items.title"
        );
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("bad created_at".to_string());
        assert_eq!(error.to_string(), "Invalid data: bad created_at");
    }
}
