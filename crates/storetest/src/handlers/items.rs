//! Item creation handler.
//!
//! Every outcome that is not a storage or filesystem failure ends in a
//! redirect back to the listing page, including submissions that were
//! dropped for an empty title.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;

use storetest_core::item::NewItem;

use crate::{handlers::AppError, state::AppState};

/// A file attached to a submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client, unsanitized.
    pub filename: String,
    pub bytes: Bytes,
}

/// Raw form values of a submission, before validation.
#[derive(Debug, Default)]
pub struct Submission {
    pub title: Option<String>,
    pub note: Option<String>,
    pub image: Option<UploadedFile>,
}

/// URL-encoded variant of the form (no file).
#[derive(Debug, Deserialize)]
struct UrlEncodedSubmission {
    title: Option<String>,
    note: Option<String>,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// Collects the `title`, `note` and `image` fields. Unknown fields are
/// ignored; for repeated fields the first one wins.
async fn read_multipart(multipart: &mut Multipart) -> Result<Submission, Response> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" if submission.title.is_none() => {
                submission.title = Some(field.text().await.map_err(IntoResponse::into_response)?);
            }
            "note" if submission.note.is_none() => {
                submission.note = Some(field.text().await.map_err(IntoResponse::into_response)?);
            }
            "image" if submission.image.is_none() => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;

                // Browsers send an empty part when no file was picked
                if !filename.is_empty() {
                    submission.image = Some(UploadedFile { filename, bytes });
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return read_multipart(&mut multipart).await;
        }

        let Form(form) = Form::<UrlEncodedSubmission>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(Submission {
            title: form.title,
            note: form.note,
            image: None,
        })
    }
}

/// `302 Found` back to the listing page.
fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Create a new item (POST /items).
pub async fn create_item(
    State(state): State<AppState>,
    submission: Submission,
) -> Result<Response, AppError> {
    let mut item = match NewItem::from_form(
        submission.title.as_deref(),
        submission.note.as_deref(),
        None,
        Utc::now(),
    ) {
        Ok(item) => item,
        Err(err) => {
            tracing::debug!(reason = %err, "Ignoring submission");
            return Ok(redirect_home());
        }
    };

    if let Some(image) = &submission.image {
        item.image_path = state.uploads.save(&image.filename, &image.bytes).await?;
    }

    state.items.insert_item(&item).await?;

    tracing::info!(
        title = %item.title,
        image_path = ?item.image_path,
        "Created new item"
    );

    Ok(redirect_home())
}
