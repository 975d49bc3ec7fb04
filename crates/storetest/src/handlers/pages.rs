use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};

use storetest_core::{datefmt::relative_time, item::Item, upload::ALLOWED_EXTENSIONS};

use crate::{handlers::AppError, state::AppState};

/// Template wrapper that converts Askama templates into HTML responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// One listed item, ready for display.
struct ItemView {
    id: i64,
    title: String,
    note: Option<String>,
    image_url: Option<String>,
    created_label: String,
    created_iso: String,
}

impl ItemView {
    fn new(item: Item, now: DateTime<Utc>) -> Self {
        Self {
            id: item.id,
            created_label: relative_time(item.created_at, now),
            created_iso: item.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            image_url: item.image_path.map(|name| format!("/uploads/{name}")),
            title: item.title,
            note: item.note,
        }
    }
}

/// Index page template showing the submission form and the item list.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    items: Vec<ItemView>,
    accept: String,
    db_path: String,
    upload_dir: String,
}

/// Handler for the index page (GET /).
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = state.items.list_items().await?;
    let now = Utc::now();

    tracing::debug!(count = items.len(), "Rendering item list");

    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    Ok(HtmlTemplate(IndexTemplate {
        items: items.into_iter().map(|item| ItemView::new(item, now)).collect(),
        accept,
        db_path: state.config.db_path.display().to_string(),
        upload_dir: state.uploads.dir().display().to_string(),
    }))
}
