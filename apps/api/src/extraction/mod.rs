// Application-form extraction: PDF bytes → text → normalized text → record.
// Pure and single-pass; CPU-bound, so HTTP handlers call it from spawn_blocking.

pub mod employment;
pub mod fields;
pub mod normalize;
pub mod record;

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

pub use record::ApplicationRecord;

/// Failure to turn the supplied bytes into text.
///
/// Missing fields are never an error: they resolve to empty defaults.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Extracts an application record from raw PDF bytes.
pub fn extract(pdf_bytes: &[u8]) -> Result<ApplicationRecord, ExtractError> {
    let raw = pdf_to_text(pdf_bytes)?;
    Ok(extract_from_text(&raw))
}

/// Runs the text stages of the pipeline on already-extracted text.
pub fn extract_from_text(raw: &str) -> ApplicationRecord {
    let text = normalize::clean_text(raw);
    let record = record::assemble_record(&text);
    debug!(
        "Extracted {} populated field(s) and {} employment row(s)",
        record.filled_field_count(),
        record.employment.len()
    );
    record
}

fn pdf_to_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    if !pdf_bytes.starts_with(b"%PDF") {
        return Err(ExtractError::MalformedInput(
            "missing %PDF header".to_string(),
        ));
    }

    // The PDF backend panics on some hostile inputs instead of returning an error.
    match catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(pdf_bytes)
    })) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::MalformedInput(e.to_string())),
        Err(_) => Err(ExtractError::MalformedInput(
            "PDF backend aborted while reading the document".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};

    /// Builds a text-only PDF, one page per entry, one text line per string.
    fn text_pdf(pages: &[&[&str]]) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(b"Helvetica".to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ]));
        let resources = Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
        )]);

        let mut page_ids = Vec::new();
        for lines in pages {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(50), Object::Integer(750)]),
                Operation::new("TL", vec![Object::Integer(14)]),
            ];
            for line in lines.iter() {
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new("ET", vec![]));
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

            page_ids.push(doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Resources", Object::Dictionary(resources.clone())),
                ("Contents", Object::Reference(content_id)),
            ])));
        }

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(page_ids.len() as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_two_page_form_is_extracted() {
        let bytes = text_pdf(&[
            &["First Name: Ada", "Last Name", "Lovelace"],
            &[
                "Campus: Ealing",
                "Employer",
                "Job Description",
                "Start Date",
                "End Date",
                "Contact Name",
                "Acme",
                "Clerk",
                "2020-01",
                "2021-01",
                "Boss",
            ],
        ]);
        assert!(bytes.starts_with(b"%PDF"));

        let record = extract(&bytes).unwrap();
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "Lovelace");
        assert_eq!(record.campus, "Ealing");
        assert_eq!(record.email, "");
        assert_eq!(record.employment.len(), 1);
        assert_eq!(record.employment[0].employer, "Acme");
        assert_eq!(record.employment[0].contact_name, "Boss");
    }

    #[test]
    fn test_non_pdf_bytes_are_malformed() {
        let err = extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedInput(_)));
    }

    #[test]
    fn test_empty_bytes_are_malformed() {
        assert!(matches!(
            extract(&[]),
            Err(ExtractError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_truncated_pdf_is_malformed() {
        let err = extract(b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedInput(_)));
    }

    #[test]
    fn test_extract_from_text_normalizes_before_lookup() {
        let record = extract_from_text("First Name:  Ada \r\nLast Name\r\nLovelace\n\nCampus: Ealing");
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "Lovelace");
        assert_eq!(record.campus, "Ealing");
    }
}
