use serde::{Deserialize, Serialize};

use crate::extraction::employment::{extract_employment, EmploymentRecord};
use crate::extraction::fields::find_value;

// ────────────────────────────────────────────────────────────────────────────
// Form captions
// ────────────────────────────────────────────────────────────────────────────

pub const LABEL_APPLICATION_REF: &str = "Application Ref";
pub const LABEL_TITLE: &str = "Title";
pub const LABEL_FIRST_NAME: &str = "First Name";
pub const LABEL_MIDDLE_NAME: &str = "Middle Name";
pub const LABEL_LAST_NAME: &str = "Last Name";
pub const LABEL_DOB: &str = "Date of Birth";
pub const LABEL_EMAIL: &str = "Email Address";
pub const LABEL_MOBILE: &str = "Mobile";
pub const LABEL_NATIONALITY: &str = "Nationality";
pub const LABEL_PROGRAM: &str = "Program";
pub const LABEL_INTAKE: &str = "Intake";
pub const LABEL_CAMPUS: &str = "Campus";
pub const LABEL_TERM_POSTCODE: &str = "Term time Postcode";
pub const LABEL_ADDRESS_LINE_1: &str = "Address Line 1";
pub const LABEL_CITY: &str = "City";
pub const LABEL_POSTCODE: &str = "Postcode";
pub const LABEL_COUNTRY: &str = "Country";
pub const LABEL_FEE_PAYER: &str = "Who will pay your fees?";
pub const LABEL_PREVIOUS_LOAN: &str = "Have you previously received a student loan?";
pub const LABEL_REFERENCE_NAME: &str = "Reference 1 Name";
pub const LABEL_REFERENCE_EMAIL: &str = "Reference 1 Email/Mobile";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Permanent (home) address block of the application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermanentAddress {
    pub address_line_1: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

/// Everything recovered from one application form.
///
/// Every field is always serialized; a caption missing from the form yields an
/// empty string (or an empty employment list), never an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_ref: String,
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub dob: String,
    pub email: String,
    pub mobile: String,
    pub nationality: String,
    pub program: String,
    pub intake: String,
    pub campus: String,
    pub term_postcode: String,
    pub permanent_address: PermanentAddress,
    pub fee_payer: String,
    pub previous_loan: String,
    pub reference_name: String,
    pub reference_email: String,
    pub employment: Vec<EmploymentRecord>,
}

impl ApplicationRecord {
    /// Number of scalar fields (address included) that resolved to a value.
    pub fn filled_field_count(&self) -> usize {
        [
            &self.application_ref,
            &self.title,
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            &self.dob,
            &self.email,
            &self.mobile,
            &self.nationality,
            &self.program,
            &self.intake,
            &self.campus,
            &self.term_postcode,
            &self.permanent_address.address_line_1,
            &self.permanent_address.city,
            &self.permanent_address.postcode,
            &self.permanent_address.country,
            &self.fee_payer,
            &self.previous_loan,
            &self.reference_name,
            &self.reference_email,
        ]
        .iter()
        .filter(|value| !value.is_empty())
        .count()
    }
}

/// Builds the full record from normalized form text.
pub fn assemble_record(text: &str) -> ApplicationRecord {
    ApplicationRecord {
        application_ref: find_value(text, LABEL_APPLICATION_REF),
        title: find_value(text, LABEL_TITLE),
        first_name: find_value(text, LABEL_FIRST_NAME),
        middle_name: find_value(text, LABEL_MIDDLE_NAME),
        last_name: find_value(text, LABEL_LAST_NAME),
        dob: find_value(text, LABEL_DOB),
        email: find_value(text, LABEL_EMAIL),
        mobile: find_value(text, LABEL_MOBILE),
        nationality: find_value(text, LABEL_NATIONALITY),
        program: find_value(text, LABEL_PROGRAM),
        intake: find_value(text, LABEL_INTAKE),
        campus: find_value(text, LABEL_CAMPUS),
        term_postcode: find_value(text, LABEL_TERM_POSTCODE),
        permanent_address: PermanentAddress {
            address_line_1: find_value(text, LABEL_ADDRESS_LINE_1),
            city: find_value(text, LABEL_CITY),
            postcode: find_value(text, LABEL_POSTCODE),
            country: find_value(text, LABEL_COUNTRY),
        },
        fee_payer: find_value(text, LABEL_FEE_PAYER),
        previous_loan: find_value(text, LABEL_PREVIOUS_LOAN),
        reference_name: find_value(text, LABEL_REFERENCE_NAME),
        reference_email: find_value(text, LABEL_REFERENCE_EMAIL),
        employment: extract_employment(text),
    }
}
