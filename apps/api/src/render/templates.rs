//! Template composer.
//!
//! The header and profile always come first. The remaining sections are arranged
//! by one of five fixed layouts selected by the style bundle's template axis.
//! Only sections present in the payload are written.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::render::document::{Block, Cell, CvDocument, Grid, PageSetup};
use crate::render::header::write_header;
use crate::render::payload::CvPayload;
use crate::render::style::{StyleBundle, Template};
use crate::render::writers::{
    present_sections, write_education_timeline, write_profile, write_section,
    write_work_timeline, HeadingStyle, SectionContext, SectionKind,
};

/// Sidebar fill colour.
const SIDEBAR_SHADING: &str = "F2F2F2";
const SIDEBAR_WIDTH_CM: f32 = 5.0;

const TIMELINE_TAIL: [SectionKind; 3] = [
    SectionKind::Skills,
    SectionKind::Languages,
    SectionKind::Certifications,
];
const SHADED_ORDER: [SectionKind; 5] = [
    SectionKind::Education,
    SectionKind::Work,
    SectionKind::Skills,
    SectionKind::Languages,
    SectionKind::Certifications,
];
const SIDEBAR_LEFT: [SectionKind; 3] = [
    SectionKind::Skills,
    SectionKind::Languages,
    SectionKind::Certifications,
];
const SIDEBAR_RIGHT: [SectionKind; 2] = [SectionKind::Work, SectionKind::Education];
const MINIMALIST_ORDER: [SectionKind; 5] = [
    SectionKind::Work,
    SectionKind::Skills,
    SectionKind::Education,
    SectionKind::Languages,
    SectionKind::Certifications,
];

/// Builds the full document for `payload` under `style`.
///
/// `rng` is only consulted by the shuffled layout.
pub fn compose<R: Rng + ?Sized>(payload: &CvPayload, style: &StyleBundle, rng: &mut R) -> CvDocument {
    let mut doc = CvDocument::new(PageSetup::letter(style.body_pt), style.font);
    write_header(payload.personal_details.as_ref(), style, &mut doc.blocks);

    let main = SectionContext {
        style,
        heading: HeadingStyle::for_template(style.template),
        dividers: style.show_dividers,
    };

    if let Some(summary) = payload.profile.as_deref() {
        write_profile(summary, main, &mut doc.blocks);
    }

    match style.template {
        Template::Shuffled => {
            let mut order = present_sections(payload);
            order.shuffle(rng);
            write_in_order(&order, payload, main, &mut doc.blocks);
        }
        Template::Timeline => {
            if let Some(jobs) = payload.employment_history.as_deref() {
                write_work_timeline(jobs, main, &mut doc.blocks);
            }
            if let Some(entries) = payload.education_history.as_deref() {
                write_education_timeline(entries, main, &mut doc.blocks);
            }
            write_in_order(&TIMELINE_TAIL, payload, main, &mut doc.blocks);
        }
        Template::Shaded => write_in_order(&SHADED_ORDER, payload, main, &mut doc.blocks),
        Template::Sidebar => {
            if let Some(grid) = sidebar(payload, main) {
                doc.blocks.push(grid.into());
            }
        }
        Template::Minimalist => write_in_order(&MINIMALIST_ORDER, payload, main, &mut doc.blocks),
    }

    doc
}

fn write_in_order(order: &[SectionKind], payload: &CvPayload, ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    for kind in order {
        write_section(*kind, payload, ctx, out);
    }
}

/// Two side-by-side regions: a narrow shaded column for skills, languages and
/// certifications, and a wide column for work and education.
fn sidebar(payload: &CvPayload, ctx: SectionContext<'_>) -> Option<Grid> {
    // Dividers are sized for the full text width; they would wrap inside a column.
    let column_ctx = SectionContext {
        dividers: false,
        ..ctx
    };

    let mut left = Vec::new();
    write_in_order(&SIDEBAR_LEFT, payload, column_ctx, &mut left);
    let mut right = Vec::new();
    write_in_order(&SIDEBAR_RIGHT, payload, column_ctx, &mut right);

    if left.is_empty() && right.is_empty() {
        return None;
    }

    let page = PageSetup::letter(ctx.style.body_pt);
    let text_width = page.width_cm - page.margin_left_cm - page.margin_right_cm;
    Some(Grid {
        column_widths_cm: Some(vec![SIDEBAR_WIDTH_CM, text_width - SIDEBAR_WIDTH_CM]),
        rows: vec![vec![
            Cell {
                blocks: left,
                shading: Some(SIDEBAR_SHADING.to_string()),
            },
            Cell::new(right),
        ]],
    })
}
