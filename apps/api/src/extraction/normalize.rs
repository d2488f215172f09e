//! Text normalization for PDF-extracted text.
//!
//! The PDF backend reports line endings inconsistently (`\r\n`, bare `\r`) and
//! leaves trailing padding before line breaks. Label lookups anchor on `\n`, so
//! everything downstream expects a single line-feed convention.

use std::sync::OnceLock;

use regex::Regex;

fn line_breaks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r\n?").expect("static line-break pattern"))
}

fn space_before_newline() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+\n").expect("static trailing-space pattern"))
}

/// Collapses `\r\n` and `\r` to `\n` and strips horizontal whitespace that
/// immediately precedes a line break.
pub fn clean_text(raw: &str) -> String {
    let unified = line_breaks().replace_all(raw, "\n");
    space_before_newline()
        .replace_all(&unified, "\n")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_and_cr_become_lf() {
        assert_eq!(clean_text("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_trailing_whitespace_before_newline_is_removed() {
        assert_eq!(clean_text("Name:  Ada \t\r\nCity  \n"), "Name:  Ada\nCity\n");
    }

    #[test]
    fn test_leading_whitespace_is_preserved() {
        assert_eq!(clean_text("  indented\n"), "  indented\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_text(""), "");
    }
}
