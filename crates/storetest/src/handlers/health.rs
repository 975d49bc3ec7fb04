//! Health check endpoint.
//!
//! - `/livez` - Basic liveness check (immediate 200, no dependencies touched)

use axum::http::StatusCode;

/// GET /livez - Basic liveness check.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
/// Does NOT touch the database.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
