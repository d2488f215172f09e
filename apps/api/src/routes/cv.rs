//! JSON CV payload → styled `.docx`.

use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::render::render_cv;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Deserialize)]
pub struct CvQuery {
    /// Layout index 0–4; out-of-range values are clamped.
    pub template: Option<i64>,
}

/// POST /cv?template=N
///
/// Renders the CV payload with a random style (and optionally a pinned
/// template) and returns the document as an attachment.
pub async fn handle_render_cv(
    Query(query): Query<CvQuery>,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    let filename = download_filename(&payload);
    let template = query.template;

    let bytes = tokio::task::spawn_blocking(move || render_cv(&payload, template))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    info!("Rendered {filename} ({} bytes)", bytes.len());
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// `First_Last_CV.docx` from the payload's personal details, or `CV.docx`.
pub fn download_filename(payload: &Value) -> String {
    let details = payload.get("personal_details");
    let part = |key: &str| {
        details
            .and_then(|d| d.get(key))
            .and_then(Value::as_str)
            .map(sanitize)
            .unwrap_or_default()
    };
    let stem = [part("first_name"), part("last_name")]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "CV.docx".to_string()
    } else {
        format!("{stem}_CV.docx")
    }
}

/// Keeps characters that are safe in a header-quoted filename.
fn sanitize(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
