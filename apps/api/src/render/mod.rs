// CV rendering: JSON payload → style draw → template composition → page fill → .docx bytes.
// CPU-bound; HTTP handlers call it from spawn_blocking.

pub mod document;
pub mod docx;
pub mod header;
pub mod page_fill;
pub mod payload;
pub mod style;
pub mod templates;
pub mod writers;

use rand::Rng;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::render::document::CvDocument;
use crate::render::payload::CvPayload;
use crate::render::style::style_with_override;

/// Failure to render a CV payload.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid CV payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid '{section}' section: {reason}")]
    InvalidSection { section: String, reason: String },

    #[error("Failed to write document: {0}")]
    Serialize(String),
}

/// Renders a CV payload to `.docx` bytes with a fresh random style.
///
/// `template` pins the layout (clamped to 0–4); every other style axis stays random.
pub fn render_cv(payload: &Value, template: Option<i64>) -> Result<Vec<u8>, RenderError> {
    render_cv_with_rng(payload, template, &mut rand::rng())
}

/// `render_cv` with an explicit random source.
pub fn render_cv_with_rng<R: Rng + ?Sized>(
    payload: &Value,
    template: Option<i64>,
    rng: &mut R,
) -> Result<Vec<u8>, RenderError> {
    let doc = build_document(payload, template, rng)?;
    docx::to_docx_bytes(&doc)
}

/// Composes the document without serializing it.
pub fn build_document<R: Rng + ?Sized>(
    payload: &Value,
    template: Option<i64>,
    rng: &mut R,
) -> Result<CvDocument, RenderError> {
    let cv = CvPayload::from_value(payload)?;
    if cv.has_no_sections() {
        debug!("CV payload has no body sections; rendering header only");
    }
    let style = style_with_override(rng, template);
    let mut doc = templates::compose(&cv, &style, rng);
    let fill = page_fill::ensure_one_page(&mut doc);
    info!(
        "Composed CV: template={} ({:?}) font={} est_lines={}/{} fill={:?}",
        style.template.index(),
        style.template,
        style.font,
        fill.estimated_lines,
        fill.lines_per_page,
        fill.verdict
    );
    Ok(doc)
}
