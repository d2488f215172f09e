//! Labeled-field lookup over normalized form text.
//!
//! Application-form exports place some captions inline (`Label: value`) and
//! others on their own line with the value underneath. Lookups try the inline
//! shape first and fall back to the caption shape.
//!
//! Only the first occurrence of a label is considered. A label that is a prefix
//! of another caption (e.g. "Postcode" inside "Term time Postcode") can match
//! the longer caption when it appears first in the text.

use regex::Regex;
use tracing::warn;

/// Returns the value captured for `label`, or `default` when neither the inline
/// nor the next-line shape matches.
pub fn find_value_or(text: &str, label: &str, default: &str) -> String {
    let escaped = regex::escape(label);

    // Label, optional trailing dot, colon, value on the same line. The whitespace
    // around the colon may span a line break ("Label:\nvalue").
    let inline = format!(r"(?i){escaped}[^\S\r\n]*\.?\s*:\s*(.+)");
    if let Some(value) = first_capture(&inline, text) {
        return value;
    }

    // Label alone on its line, value on the next non-empty line.
    let next_line = format!(r"(?i){escaped}[^\S\r\n]*\n\s*(.+)");
    if let Some(value) = first_capture(&next_line, text) {
        return value;
    }

    default.to_string()
}

/// `find_value_or` with an empty-string default.
pub fn find_value(text: &str, label: &str) -> String {
    find_value_or(text, label, "")
}

fn first_capture(pattern: &str, text: &str) -> Option<String> {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("Skipping unusable label pattern {pattern:?}: {e}");
            return None;
        }
    };
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
