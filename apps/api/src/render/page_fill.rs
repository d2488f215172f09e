//! Page fill analysis: inflates CVs that would print well short of one page.
//!
//! After composition, a sparse CV (few skills, short profile) can leave most of
//! the page empty. This module estimates the printed length and, when it falls
//! below one page, applies a single one-shot inflation.
//!
//! # Estimation rules
//! - Printed lines ≈ characters of top-level paragraph text ÷ 80, minimum 1
//! - Lines per page = usable height ÷ (11 pt line ≈ 0.39 cm × 1.2 leading)
//! - Underfilled → body text +1 pt, top and bottom margins +1 cm each
//!
//! This is a heuristic, not a pagination engine.

use crate::render::document::CvDocument;

pub const CHARS_PER_LINE: usize = 80;
/// Height of one body line including leading.
pub const LINE_HEIGHT_CM: f32 = 0.39 * 1.2;
pub const BODY_STEP_PT: f32 = 1.0;
pub const MARGIN_STEP_CM: f32 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFillVerdict {
    /// Estimated content reaches at least one full page.
    Filled,
    /// Estimated content is shorter than one page.
    Underfilled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageFillAnalysis {
    pub estimated_lines: usize,
    pub lines_per_page: usize,
    pub verdict: PageFillVerdict,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Estimates printed lines from the character count of top-level paragraphs.
///
/// Text inside tables is not counted.
pub fn estimate_lines(doc: &CvDocument) -> usize {
    let total_chars: usize = doc
        .paragraphs()
        .flat_map(|p| p.spans.iter())
        .map(|span| span.text.chars().count())
        .sum();
    ((total_chars as f32 / CHARS_PER_LINE as f32).round() as usize).max(1)
}

/// Body lines that fit on one page with the document's current margins.
pub fn lines_per_page(doc: &CvDocument) -> usize {
    (doc.page.usable_height_cm() / LINE_HEIGHT_CM).max(0.0) as usize
}

pub fn analyze_page_fill(doc: &CvDocument) -> PageFillAnalysis {
    let estimated_lines = estimate_lines(doc);
    let lines_per_page = lines_per_page(doc);
    let verdict = if estimated_lines >= lines_per_page {
        PageFillVerdict::Filled
    } else {
        PageFillVerdict::Underfilled
    };
    PageFillAnalysis {
        estimated_lines,
        lines_per_page,
        verdict,
    }
}

/// Inflates an underfilled document once. Returns the analysis taken before
/// any adjustment.
pub fn ensure_one_page(doc: &mut CvDocument) -> PageFillAnalysis {
    let analysis = analyze_page_fill(doc);
    if analysis.verdict == PageFillVerdict::Underfilled {
        doc.page.body_pt += BODY_STEP_PT;
        doc.page.margin_top_cm += MARGIN_STEP_CM;
        doc.page.margin_bottom_cm += MARGIN_STEP_CM;
    }
    analysis
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::document::{Cell, Grid, PageSetup, Paragraph};

    fn doc_with_chars(n: usize) -> CvDocument {
        let mut doc = CvDocument::new(PageSetup::letter(12.0), "Georgia");
        doc.blocks.push(Paragraph::text("x".repeat(n)).into());
        doc
    }

    #[test]
    fn test_lines_per_page_for_letter() {
        // (27.94 - 2.4) / 0.468 ≈ 54.6
        assert_eq!(lines_per_page(&doc_with_chars(0)), 54);
    }

    #[test]
    fn test_estimate_is_at_least_one_line() {
        assert_eq!(estimate_lines(&doc_with_chars(0)), 1);
        assert_eq!(estimate_lines(&doc_with_chars(10)), 1);
        assert_eq!(estimate_lines(&doc_with_chars(800)), 10);
    }

    #[test]
    fn test_table_text_is_not_counted() {
        let mut doc = doc_with_chars(80);
        doc.blocks.push(
            Grid {
                column_widths_cm: None,
                rows: vec![vec![Cell::new(vec![Paragraph::text("y".repeat(8000)).into()])]],
            }
            .into(),
        );
        assert_eq!(estimate_lines(&doc), 1);
    }

    #[test]
    fn test_sparse_document_is_inflated_once() {
        let mut doc = doc_with_chars(400);
        let analysis = ensure_one_page(&mut doc);
        assert_eq!(analysis.verdict, PageFillVerdict::Underfilled);
        assert!((doc.page.body_pt - 13.0).abs() < 1e-6);
        assert!((doc.page.margin_top_cm - 2.2).abs() < 1e-5);
        assert!((doc.page.margin_bottom_cm - 2.2).abs() < 1e-5);
        assert!((doc.page.margin_left_cm - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_full_document_is_untouched() {
        let mut doc = doc_with_chars(80 * 60);
        let before = doc.page.clone();
        let analysis = ensure_one_page(&mut doc);
        assert_eq!(analysis.verdict, PageFillVerdict::Filled);
        assert_eq!(doc.page, before);
    }
}
