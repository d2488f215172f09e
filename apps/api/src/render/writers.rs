//! Section writers.
//!
//! One writer per CV section. Each writer appends a heading plus its body to a
//! block container (the document body or a table cell) and never reads what
//! other writers produced. How headings look is decided by the `HeadingStyle`
//! the composer hands in.

use chrono::NaiveDate;

use crate::render::document::{Block, Cell, Grid, Paragraph, ParagraphRole, Span};
use crate::render::payload::{Certification, CvPayload, Education, Job, LanguageQualification};
use crate::render::style::{StyleBundle, Template};

/// Text shown for an open-ended date range.
pub const PRESENT: &str = "Present";

/// Inverted heading text colour used on shaded headings.
const SHADED_TEXT: &str = "FFFFFF";

const TIMELINE_COLUMNS_CM: [f32; 2] = [3.0, 13.0];

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Formats a `YYYY-MM` month as `Mon YYYY`.
///
/// Values in any other shape pass through unchanged; a missing or blank value
/// renders as "Present".
pub fn format_month(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return PRESENT.to_string();
    };
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes.iter().enumerate().all(|(i, b)| i == 4 || b.is_ascii_digit());
    if !shaped {
        return value.to_string();
    }
    match NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Formats a start/end pair as `Start – End`.
///
/// Both missing → empty string. A missing end renders as "Present"; a missing
/// start drops the leading dash.
pub fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());
    if start.is_none() && end.is_none() {
        return String::new();
    }
    let start_txt = start.map(|s| format_month(Some(s))).unwrap_or_default();
    let end_txt = format_month(end);
    format!("{start_txt} – {end_txt}")
        .trim_matches(|c| c == ' ' || c == '–')
        .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Headings
// ────────────────────────────────────────────────────────────────────────────

/// How a section heading is drawn. Passed by value to every writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// Accent-coloured text with the bundle's bottom rule.
    Standard,
    /// Accent-filled background with inverted text.
    Shaded,
    /// Accent-coloured text, no rule.
    Borderless,
}

impl HeadingStyle {
    pub fn for_template(template: Template) -> Self {
        match template {
            Template::Shaded => HeadingStyle::Shaded,
            Template::Minimalist => HeadingStyle::Borderless,
            Template::Shuffled | Template::Timeline | Template::Sidebar => HeadingStyle::Standard,
        }
    }

    pub fn render(self, title: &str, style: &StyleBundle) -> Paragraph {
        let text_color = match self {
            HeadingStyle::Shaded => SHADED_TEXT,
            HeadingStyle::Standard | HeadingStyle::Borderless => style.accent,
        };
        let mut heading = Paragraph::new()
            .span(
                Span::plain(style.heading_case.apply(title))
                    .bold()
                    .size(style.heading_pt)
                    .color(text_color),
            )
            .role(ParagraphRole::Heading)
            .spacing(8.0, 4.0);
        heading.keep_with_next = true;
        if self != HeadingStyle::Borderless {
            heading.bottom_border = Some(style.border);
        }
        if self == HeadingStyle::Shaded {
            heading.shading = Some(style.accent.to_string());
        }
        heading
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Work,
    Education,
    Skills,
    Languages,
    Certifications,
}

impl SectionKind {
    /// Canonical order, also used by the shuffled template before shuffling.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Work,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Languages,
        SectionKind::Certifications,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Work => "Work History",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Languages => "Languages",
            SectionKind::Certifications => "Certifications",
        }
    }

    pub fn is_present(self, payload: &CvPayload) -> bool {
        match self {
            SectionKind::Work => payload.employment_history.is_some(),
            SectionKind::Education => payload.education_history.is_some(),
            SectionKind::Skills => payload.skills.is_some(),
            SectionKind::Languages => payload.language_qualifications.is_some(),
            SectionKind::Certifications => payload.certifications.is_some(),
        }
    }
}

/// Sections with data, in canonical order.
pub fn present_sections(payload: &CvPayload) -> Vec<SectionKind> {
    SectionKind::ALL
        .into_iter()
        .filter(|kind| kind.is_present(payload))
        .collect()
}

/// Everything a writer needs besides its data.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub style: &'a StyleBundle,
    pub heading: HeadingStyle,
    /// Append the bundle's divider after the section body.
    pub dividers: bool,
}

impl SectionContext<'_> {
    fn push_heading(&self, out: &mut Vec<Block>, title: &str) {
        out.push(self.heading.render(title, self.style).into());
    }

    fn push_divider(&self, out: &mut Vec<Block>) {
        if self.dividers {
            out.push(
                Paragraph::new()
                    .span(Span::plain(self.style.divider.clone()).color(self.style.accent))
                    .spacing(0.0, 4.0)
                    .into(),
            );
        }
    }
}

/// Writes `kind` if the payload carries it. Returns whether anything was written.
pub fn write_section(kind: SectionKind, payload: &CvPayload, ctx: SectionContext<'_>, out: &mut Vec<Block>) -> bool {
    match kind {
        SectionKind::Work => payload.employment_history.as_deref().map(|jobs| write_work(jobs, ctx, out)),
        SectionKind::Education => payload
            .education_history
            .as_deref()
            .map(|entries| write_education(entries, ctx, out)),
        SectionKind::Skills => payload.skills.as_deref().map(|skills| write_skills(skills, ctx, out)),
        SectionKind::Languages => payload
            .language_qualifications
            .as_deref()
            .map(|langs| write_languages(langs, ctx, out)),
        SectionKind::Certifications => payload
            .certifications
            .as_deref()
            .map(|certs| write_certifications(certs, ctx, out)),
    }
    .is_some()
}

pub fn write_profile(summary: &str, ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, "Profile");
    out.push(Paragraph::text(summary).into());
    ctx.push_divider(out);
}

pub fn write_work(jobs: &[Job], ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, SectionKind::Work.title());
    for job in jobs {
        let mut title = Paragraph::text(join_non_empty(&[job.position.as_str(), job.company.as_str()], " — ")).space_after(0.0);
        let dates = date_range(job.start_date.as_deref(), job.end_date.as_deref());
        if !dates.is_empty() {
            title = title.span(Span::plain(format!("  {dates}")).italic());
        }
        out.push(title.into());
        out.extend(bullets(&job.responsibilities, ctx.style.bullet, None));
    }
    ctx.push_divider(out);
}

pub fn write_education(entries: &[Education], ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, SectionKind::Education.title());
    for entry in entries {
        let mut title = Paragraph::text(join_non_empty(
            &[entry.degree.as_str(), entry.institution.as_str(), entry.location.as_str()],
            ", ",
        ));
        let dates = date_range(entry.start_date.as_deref(), entry.end_date.as_deref());
        if !dates.is_empty() {
            title = title.span(Span::plain(format!("  {dates}")).italic());
        }
        out.push(title.into());
        if !entry.result.trim().is_empty() {
            out.push(Paragraph::text(format!("Result: {}", entry.result)).into());
        }
    }
    ctx.push_divider(out);
}

pub fn write_skills(skills: &[String], ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, SectionKind::Skills.title());
    out.push(two_column_grid(skills, ctx.style.bullet).into());
    ctx.push_divider(out);
}

pub fn write_languages(langs: &[LanguageQualification], ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, SectionKind::Languages.title());
    let items: Vec<String> = langs.iter().map(language_line).collect();
    out.push(two_column_grid(&items, ctx.style.bullet).into());
    ctx.push_divider(out);
}

pub fn write_certifications(certs: &[Certification], ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, SectionKind::Certifications.title());
    for cert in certs {
        out.push(Paragraph::text(certification_line(cert)).into());
    }
    ctx.push_divider(out);
}

// ────────────────────────────────────────────────────────────────────────────
// Timeline variants
// ────────────────────────────────────────────────────────────────────────────

/// Work history as a date | description table.
pub fn write_work_timeline(jobs: &[Job], ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, SectionKind::Work.title());
    let rows = jobs
        .iter()
        .map(|job| {
            let mut heading = Paragraph::new().span(Span::plain(job.position.clone()).bold());
            if !job.company.trim().is_empty() {
                heading = heading.span(Span::plain(format!(" — {}", job.company)));
            }
            let mut description = vec![heading.into()];
            description.extend(bullets(&job.responsibilities, ctx.style.bullet, Some(0.2)));
            timeline_row(job.start_date.as_deref(), job.end_date.as_deref(), description)
        })
        .collect();
    out.push(timeline_grid(rows).into());
    ctx.push_divider(out);
}

/// Education history as a date | description table.
pub fn write_education_timeline(entries: &[Education], ctx: SectionContext<'_>, out: &mut Vec<Block>) {
    ctx.push_heading(out, SectionKind::Education.title());
    let rows = entries
        .iter()
        .map(|entry| {
            let mut line = Paragraph::new().span(Span::plain(entry.degree.clone()).bold());
            if !entry.institution.trim().is_empty() {
                line = line.span(Span::plain(format!(", {}", entry.institution)));
            }
            if !entry.location.trim().is_empty() {
                line = line.span(Span::plain(format!(" — {}", entry.location)));
            }
            timeline_row(entry.start_date.as_deref(), entry.end_date.as_deref(), vec![line.into()])
        })
        .collect();
    out.push(timeline_grid(rows).into());
    ctx.push_divider(out);
}

fn timeline_row(start: Option<&str>, end: Option<&str>, description: Vec<Block>) -> Vec<Cell> {
    vec![
        Cell::new(vec![Paragraph::text(date_range(start, end)).into()]),
        Cell::new(description),
    ]
}

fn timeline_grid(rows: Vec<Vec<Cell>>) -> Grid {
    Grid {
        column_widths_cm: Some(TIMELINE_COLUMNS_CM.to_vec()),
        rows,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

fn bullets(items: &[String], glyph: &str, indent_cm: Option<f32>) -> Vec<Block> {
    items
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut p = Paragraph::new()
                .span(Span::plain(format!("{glyph} ")))
                .span(Span::plain(line.clone()))
                .spacing(0.0, 1.0);
            if let Some(cm) = indent_cm {
                p = p.indent_left(cm);
            }
            p.into()
        })
        .collect()
}

/// Balanced two-column grid: the first half of `items` fills column one
/// top to bottom, the remainder fills column two.
pub fn two_column_grid(items: &[String], glyph: &str) -> Grid {
    let n_rows = items.len().div_ceil(2);
    let rows = (0..n_rows)
        .map(|r| {
            (0..2)
                .map(|c| {
                    let paragraph = match items.get(r + c * n_rows) {
                        Some(item) => Paragraph::text(format!("{glyph} {item}")).indent_left(0.2),
                        None => Paragraph::new(),
                    };
                    Cell::new(vec![paragraph.into()])
                })
                .collect()
        })
        .collect();
    Grid {
        column_widths_cm: None,
        rows,
    }
}

fn language_line(lang: &LanguageQualification) -> String {
    if lang.level.trim().is_empty() {
        lang.language.clone()
    } else {
        format!("{} ({})", lang.language, lang.level)
    }
}

fn certification_line(cert: &Certification) -> String {
    let mut line = join_non_empty(&[cert.name.as_str(), cert.issuer.as_str()], " — ");
    if let Some(date) = cert.date_awarded.as_deref().filter(|d| !d.trim().is_empty()) {
        line.push_str(&format!(" ({})", format_month(Some(date))));
    }
    line
}

fn join_non_empty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
