//! Uploaded file serving handler.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use storetest_core::upload::content_type_for;

use crate::{handlers::AppError, state::AppState};

/// Content-Security-Policy attached to every served upload.
pub const UPLOAD_CSP: &str = "default-src 'none'; style-src 'unsafe-inline'; sandbox";

/// Serve a previously uploaded file (GET /uploads/{*filename}).
///
/// Names that are not a single plain file name inside the upload directory
/// get the same 404 as missing files.
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let Some(contents) = state.uploads.read(&filename).await? else {
        return Ok((StatusCode::NOT_FOUND, "Not found").into_response());
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&filename)),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            // SVG uploads must not run scripts when opened directly
            (header::CONTENT_SECURITY_POLICY, UPLOAD_CSP),
            // Stored names carry a unique timestamp, so content never changes
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        contents,
    )
        .into_response())
}
