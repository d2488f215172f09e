//! In-memory CV document.
//!
//! Composition writes into this tree; the page-length pass reads and adjusts it;
//! `render::docx` lowers it to a `.docx` package. Keeping an intermediate form
//! lets the whole composition be inspected in tests without unzipping XML.

use crate::render::style::{Alignment, BorderStyle};

// ────────────────────────────────────────────────────────────────────────────
// Page setup
// ────────────────────────────────────────────────────────────────────────────

/// US Letter height.
pub const LETTER_HEIGHT_CM: f32 = 27.94;
/// US Letter width.
pub const LETTER_WIDTH_CM: f32 = 21.59;

/// Page geometry and the body text size.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub height_cm: f32,
    pub width_cm: f32,
    pub margin_top_cm: f32,
    pub margin_bottom_cm: f32,
    pub margin_left_cm: f32,
    pub margin_right_cm: f32,
    pub body_pt: f32,
}

impl PageSetup {
    /// Letter paper, 1.2 cm top/bottom and 1.5 cm left/right margins.
    pub fn letter(body_pt: f32) -> Self {
        PageSetup {
            height_cm: LETTER_HEIGHT_CM,
            width_cm: LETTER_WIDTH_CM,
            margin_top_cm: 1.2,
            margin_bottom_cm: 1.2,
            margin_left_cm: 1.5,
            margin_right_cm: 1.5,
            body_pt,
        }
    }

    /// Vertical space available for text.
    pub fn usable_height_cm(&self) -> f32 {
        self.height_cm - (self.margin_top_cm + self.margin_bottom_cm)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content tree
// ────────────────────────────────────────────────────────────────────────────

/// A styled run of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size_pt: Option<f32>,
    /// RGB hex.
    pub color: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, pt: f32) -> Self {
        self.size_pt = Some(pt);
        self
    }

    pub fn color(mut self, rgb: impl Into<String>) -> Self {
        self.color = Some(rgb.into());
        self
    }
}

/// Semantic role of a paragraph. Titles are kept with the paragraph that follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphRole {
    #[default]
    Body,
    /// Document title (the candidate's name).
    Title,
    /// Section heading.
    Heading,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub role: ParagraphRole,
    pub align: Option<Alignment>,
    pub bottom_border: Option<BorderStyle>,
    /// Background fill, RGB hex.
    pub shading: Option<String>,
    pub space_before_pt: Option<f32>,
    pub space_after_pt: Option<f32>,
    pub indent_left_cm: Option<f32>,
    pub keep_with_next: bool,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new().span(Span::plain(text))
    }

    pub fn span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub fn role(mut self, role: ParagraphRole) -> Self {
        self.role = role;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn spacing(mut self, before_pt: f32, after_pt: f32) -> Self {
        self.space_before_pt = Some(before_pt);
        self.space_after_pt = Some(after_pt);
        self
    }

    pub fn space_after(mut self, after_pt: f32) -> Self {
        self.space_after_pt = Some(after_pt);
        self
    }

    pub fn indent_left(mut self, cm: f32) -> Self {
        self.indent_left_cm = Some(cm);
        self
    }

    /// Concatenated text of all spans.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub blocks: Vec<Block>,
    /// Background fill, RGB hex.
    pub shading: Option<String>,
}

impl Cell {
    pub fn new(blocks: Vec<Block>) -> Self {
        Cell {
            blocks,
            shading: None,
        }
    }
}

/// A borderless layout table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Column widths; `None` lets the table share the text width evenly.
    pub column_widths_cm: Option<Vec<f32>>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Grid(Grid),
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<Grid> for Block {
    fn from(g: Grid) -> Self {
        Block::Grid(g)
    }
}

/// A complete CV ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct CvDocument {
    pub page: PageSetup,
    pub font: String,
    pub blocks: Vec<Block>,
}

impl CvDocument {
    pub fn new(page: PageSetup, font: impl Into<String>) -> Self {
        CvDocument {
            page,
            font: font.into(),
            blocks: Vec::new(),
        }
    }

    /// Top-level paragraphs, excluding anything nested in grids.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Grid(_) => None,
        })
    }

    /// Text of every section heading, at any nesting depth, in document order.
    pub fn heading_texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_headings(&self.blocks, &mut out);
        out
    }
}

fn collect_headings(blocks: &[Block], out: &mut Vec<String>) {
    for block in blocks {
        match block {
            Block::Paragraph(p) if p.role == ParagraphRole::Heading => out.push(p.plain_text()),
            Block::Paragraph(_) => {}
            Block::Grid(grid) => {
                for cell in grid.rows.iter().flatten() {
                    collect_headings(&cell.blocks, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_height() {
        let page = PageSetup::letter(12.0);
        assert!((page.usable_height_cm() - 25.54).abs() < 1e-3);
    }

    #[test]
    fn test_paragraphs_skip_grid_content() {
        let mut doc = CvDocument::new(PageSetup::letter(12.0), "Arial");
        doc.blocks.push(Paragraph::text("top").into());
        doc.blocks.push(
            Grid {
                column_widths_cm: None,
                rows: vec![vec![Cell::new(vec![Paragraph::text("nested").into()])]],
            }
            .into(),
        );
        let texts: Vec<String> = doc.paragraphs().map(Paragraph::plain_text).collect();
        assert_eq!(texts, vec!["top".to_string()]);
    }

    #[test]
    fn test_heading_texts_descend_into_grids() {
        let mut doc = CvDocument::new(PageSetup::letter(12.0), "Arial");
        doc.blocks.push(Paragraph::text("Profile").role(ParagraphRole::Heading).into());
        doc.blocks.push(
            Grid {
                column_widths_cm: None,
                rows: vec![vec![Cell::new(vec![Paragraph::text("Skills")
                    .role(ParagraphRole::Heading)
                    .into()])]],
            }
            .into(),
        );
        assert_eq!(doc.heading_texts(), vec!["Profile", "Skills"]);
    }
}
