use crate::render::document::{Block, Paragraph, ParagraphRole, Span};
use crate::render::payload::PersonalDetails;
use crate::render::style::StyleBundle;

/// Shown when the payload carries no name at all.
const NAME_PLACEHOLDER: &str = "Name";
const CONTACT_SEPARATOR: &str = " ◆ ";
const CONTACT_PT: f32 = 9.0;

/// Writes the name block and contact line. Always the first thing in a CV.
pub fn write_header(details: Option<&PersonalDetails>, style: &StyleBundle, out: &mut Vec<Block>) {
    let default_details = PersonalDetails::default();
    let details = details.unwrap_or(&default_details);

    out.push(
        Paragraph::new()
            .span(
                Span::plain(full_name(details))
                    .size(style.name_pt)
                    .color(style.accent),
            )
            .role(ParagraphRole::Title)
            .align(style.name_align)
            .into(),
    );

    let contact = contact_line(details);
    if !contact.is_empty() {
        out.push(
            Paragraph::new()
                .span(Span::plain(contact).size(CONTACT_PT))
                .align(style.name_align)
                .into(),
        );
    }
}

pub fn full_name(details: &PersonalDetails) -> String {
    let name = format!("{} {}", details.first_name.trim(), details.last_name.trim());
    let name = name.trim();
    if name.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        name.to_string()
    }
}

/// `email ◆ phone ◆ line1, city, country`, blanks dropped.
pub fn contact_line(details: &PersonalDetails) -> String {
    let address = [
        details.address.line1.trim(),
        details.address.city.trim(),
        details.address.country.trim(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ");

    [details.email.trim(), details.phone.trim(), address.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::payload::Address;
    use crate::render::style::random_style;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ada() -> PersonalDetails {
        PersonalDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: Address {
                line1: "12 St James's Sq".to_string(),
                city: "London".to_string(),
                country: "".to_string(),
            },
            phone: "+44 20 7946 0958".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_full_name_and_placeholder() {
        assert_eq!(full_name(&ada()), "Ada Lovelace");
        assert_eq!(full_name(&PersonalDetails::default()), "Name");
        let only_last = PersonalDetails {
            last_name: "Lovelace".to_string(),
            ..Default::default()
        };
        assert_eq!(full_name(&only_last), "Lovelace");
    }

    #[test]
    fn test_contact_line_joins_non_empty_parts() {
        assert_eq!(
            contact_line(&ada()),
            "ada@example.com ◆ +44 20 7946 0958 ◆ 12 St James's Sq, London"
        );
        assert_eq!(contact_line(&PersonalDetails::default()), "");
    }

    #[test]
    fn test_header_without_contact_is_single_paragraph() {
        let style = random_style(&mut StdRng::seed_from_u64(5));
        let mut out = Vec::new();
        write_header(None, &style, &mut out);
        assert_eq!(out.len(), 1);
        let Block::Paragraph(name) = &out[0] else {
            panic!("expected name paragraph");
        };
        assert_eq!(name.role, ParagraphRole::Title);
        assert_eq!(name.align, Some(style.name_align));
        assert_eq!(name.spans[0].size_pt, Some(style.name_pt));
    }
}
