//! PDF application form → JSON record.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract, ApplicationRecord};
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const FILE_FIELD: &str = "file";

/// POST /convert
///
/// Accepts a multipart upload with a `file` field holding a PDF and returns the
/// extracted application record. Every record key is present even when the
/// form lacks that caption.
pub async fn handle_convert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApplicationRecord>, AppError> {
    let max_size_mb = state.config.max_size_mb;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_size_mb))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if field.content_type() != Some(PDF_CONTENT_TYPE) {
            return Err(AppError::UnsupportedMediaType(
                "Only PDF uploads are supported.".to_string(),
            ));
        }

        let pdf_bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_size_mb))?;
        if pdf_bytes.len() > state.config.max_upload_bytes() {
            return Err(too_large(max_size_mb));
        }

        let size = pdf_bytes.len();
        let record = tokio::task::spawn_blocking(move || extract(&pdf_bytes))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

        info!(
            "Converted {size}-byte PDF: {} field(s), {} employment row(s)",
            record.filled_field_count(),
            record.employment.len()
        );
        return Ok(Json(record));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

fn multipart_error(e: MultipartError, max_size_mb: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_size_mb)
    } else {
        AppError::Validation(format!("Invalid multipart body: {e}"))
    }
}

fn too_large(max_size_mb: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "PDF larger than allowed limit of {max_size_mb} MB."
    ))
}
