//! Serialization of a composed `CvDocument` to a `.docx` package via `docx-rs`.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BorderType, Docx, LineSpacing, PageMargin, Paragraph as DocxParagraph,
    ParagraphBorder, ParagraphBorderPosition, Run, RunFonts, Shading, ShdType, Table,
    TableBorders, TableCell, TableRow, WidthType,
};

use crate::render::document::{Block, Cell, CvDocument, Grid, Paragraph, ParagraphRole, Span};
use crate::render::style::{Alignment, BorderStyle};
use crate::render::RenderError;

/// ZIP local-file-header signature every `.docx` starts with.
pub const DOCX_MAGIC: &[u8; 4] = b"PK\x03\x04";

const TWIPS_PER_CM: f32 = 1440.0 / 2.54;
/// Heading rule weight in eighths of a point.
const HEADING_RULE_SIZE: usize = 4;
const HEADING_RULE_COLOR: &str = "C0C0C0";

/// Packs the document into `.docx` bytes.
pub fn to_docx_bytes(doc: &CvDocument) -> Result<Vec<u8>, RenderError> {
    let mut cursor = Cursor::new(Vec::new());
    build(doc)
        .build()
        .pack(&mut cursor)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn build(doc: &CvDocument) -> Docx {
    let page = &doc.page;
    let fonts = RunFonts::new()
        .ascii(&doc.font)
        .hi_ansi(&doc.font)
        .cs(&doc.font)
        .east_asia(&doc.font);

    let mut docx = Docx::new()
        .page_size(cm_to_twips(page.width_cm) as u32, cm_to_twips(page.height_cm) as u32)
        .page_margin(
            PageMargin::new()
                .top(cm_to_twips(page.margin_top_cm))
                .bottom(cm_to_twips(page.margin_bottom_cm))
                .left(cm_to_twips(page.margin_left_cm))
                .right(cm_to_twips(page.margin_right_cm)),
        )
        .default_fonts(fonts)
        .default_size(half_points(page.body_pt));

    for block in &doc.blocks {
        docx = match block {
            Block::Paragraph(p) => docx.add_paragraph(paragraph(p)),
            Block::Grid(g) => docx.add_table(table(g)),
        };
    }
    docx
}

fn paragraph(p: &Paragraph) -> DocxParagraph {
    let mut out = DocxParagraph::new();
    for span in &p.spans {
        out = out.add_run(run(span));
    }

    if let Some(align) = p.align {
        out = out.align(match align {
            Alignment::Left => AlignmentType::Left,
            Alignment::Center => AlignmentType::Center,
        });
    }
    if p.space_before_pt.is_some() || p.space_after_pt.is_some() {
        let mut spacing = LineSpacing::new();
        if let Some(before) = p.space_before_pt {
            spacing = spacing.before(points_to_twips(before));
        }
        if let Some(after) = p.space_after_pt {
            spacing = spacing.after(points_to_twips(after));
        }
        out = out.line_spacing(spacing);
    }
    if let Some(cm) = p.indent_left_cm {
        out = out.indent(Some(cm_to_twips(cm)), None, None, None);
    }
    if p.keep_with_next {
        out = out.keep_next(true);
    }
    if let Some(border) = p.bottom_border {
        out.property = out.property.set_border(
            ParagraphBorder::new(ParagraphBorderPosition::Bottom)
                .val(border_type(border))
                .size(HEADING_RULE_SIZE)
                .color(HEADING_RULE_COLOR),
        );
    }
    if let Some(fill) = &p.shading {
        out.property = out
            .property
            .shading(Shading::new().shd_type(ShdType::Clear).fill(fill));
    }
    if p.role == ParagraphRole::Title {
        out = out.keep_next(true);
    }
    out
}

fn run(span: &Span) -> Run {
    let mut run = Run::new().add_text(&span.text);
    if span.bold {
        run = run.bold();
    }
    if span.italic {
        run = run.italic();
    }
    if let Some(pt) = span.size_pt {
        run = run.size(half_points(pt));
    }
    if let Some(color) = &span.color {
        run = run.color(color);
    }
    run
}

fn table(grid: &Grid) -> Table {
    let widths: Option<Vec<usize>> = grid
        .column_widths_cm
        .as_ref()
        .map(|cols| cols.iter().map(|cm| cm_to_twips(*cm) as usize).collect());

    let rows = grid
        .rows
        .iter()
        .map(|row| {
            TableRow::new(
                row.iter()
                    .enumerate()
                    .map(|(i, cell)| table_cell(cell, widths.as_ref().and_then(|w| w.get(i).copied())))
                    .collect(),
            )
        })
        .collect();

    let mut table = Table::new(rows).set_borders(TableBorders::with_empty());
    if let Some(widths) = widths {
        table = table.set_grid(widths);
    }
    table
}

fn table_cell(cell: &Cell, width_twips: Option<usize>) -> TableCell {
    let mut out = TableCell::new();
    for block in &cell.blocks {
        out = match block {
            Block::Paragraph(p) => out.add_paragraph(paragraph(p)),
            Block::Grid(g) => out.add_table(table(g)),
        };
    }
    // A cell must end with a paragraph to be valid WordprocessingML.
    if !matches!(cell.blocks.last(), Some(Block::Paragraph(_))) {
        out = out.add_paragraph(DocxParagraph::new());
    }
    if let Some(width) = width_twips {
        out = out.width(width, WidthType::Dxa);
    }
    if let Some(fill) = &cell.shading {
        out = out.shading(Shading::new().shd_type(ShdType::Clear).fill(fill));
    }
    out
}

fn border_type(border: BorderStyle) -> BorderType {
    match border {
        BorderStyle::Single => BorderType::Single,
        BorderStyle::Double => BorderType::Double,
        BorderStyle::Dotted => BorderType::Dotted,
        BorderStyle::Dashed => BorderType::Dashed,
        BorderStyle::DotDash => BorderType::DotDash,
    }
}

fn cm_to_twips(cm: f32) -> i32 {
    (cm * TWIPS_PER_CM).round() as i32
}

fn points_to_twips(pt: f32) -> u32 {
    (pt * 20.0).round() as u32
}

fn half_points(pt: f32) -> usize {
    (pt * 2.0).round() as usize
}
