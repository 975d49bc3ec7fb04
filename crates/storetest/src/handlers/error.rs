use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storetest_core::storage::{repository_error_to_status_code, RepositoryError};

/// Application error type that wraps `anyhow::Error`.
///
/// This allows using `?` on functions that return `Result<_, anyhow::Error>`
/// (or any error convertible into it) to turn them into `Result<_, AppError>`.
/// The client only ever sees a generic message; details go to the log.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        self.0
            .downcast_ref::<RepositoryError>()
            .map(repository_error_to_status_code)
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        tracing::error!(status = %status_code, error = %self.0, "Application error");

        (status_code, "Something went wrong").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_status() {
        let err = AppError::from(RepositoryError::ConnectionFailed("locked".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = AppError::from(RepositoryError::QueryFailed("boom".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_other_errors_are_500() {
        let err = AppError::from(std::io::Error::other("disk full"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
