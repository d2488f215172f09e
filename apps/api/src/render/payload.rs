//! Typed CV payload.
//!
//! Every top-level section is optional. `null`, a missing key, an empty string,
//! and an empty list all mean "section absent", and absent sections are skipped
//! by the composer. Sections are decoded one at a time so a shape error can name
//! the section that caused it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::render::RenderError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_empty")]
    pub line1: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address: Address,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    #[serde(deserialize_with = "null_as_empty")]
    pub position: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "null_as_empty")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub field: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageQualification {
    #[serde(deserialize_with = "null_as_empty")]
    pub language: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub issuer: String,
    pub date_awarded: Option<String>,
}

/// A CV request body. `None` means the section is not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CvPayload {
    pub personal_details: Option<PersonalDetails>,
    pub profile: Option<String>,
    pub employment_history: Option<Vec<Job>>,
    pub education_history: Option<Vec<Education>>,
    pub skills: Option<Vec<String>>,
    pub language_qualifications: Option<Vec<LanguageQualification>>,
    pub certifications: Option<Vec<Certification>>,
}

impl CvPayload {
    /// Decodes a JSON value, section by section.
    pub fn from_value(value: &Value) -> Result<Self, RenderError> {
        let map = value.as_object().ok_or_else(|| {
            RenderError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(value)
            ))
        })?;

        Ok(CvPayload {
            personal_details: section(map, "personal_details")?,
            profile: section::<String>(map, "profile")?.filter(|s| !s.trim().is_empty()),
            employment_history: list_section(map, "employment_history")?,
            education_history: list_section(map, "education_history")?,
            skills: list_section::<Option<String>>(map, "skills")?
                .map(|skills| {
                    skills
                        .into_iter()
                        .flatten()
                        .filter(|s| !s.trim().is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|skills| !skills.is_empty()),
            language_qualifications: list_section(map, "language_qualifications")?,
            certifications: list_section(map, "certifications")?,
        })
    }

    /// True when no body section (profile and below) is present.
    pub fn has_no_sections(&self) -> bool {
        self.profile.is_none()
            && self.employment_history.is_none()
            && self.education_history.is_none()
            && self.skills.is_none()
            && self.language_qualifications.is_none()
            && self.certifications.is_none()
    }
}

/// Reads an explicit `null` as the field's default, the same as a missing key.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn section<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Result<Option<T>, RenderError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| RenderError::InvalidSection {
                section: key.to_string(),
                reason: e.to_string(),
            }),
    }
}

fn list_section<T: DeserializeOwned>(
    map: &Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<T>>, RenderError> {
    if let Some(value) = map.get(key) {
        if !value.is_array() && !value.is_null() {
            return Err(RenderError::InvalidSection {
                section: key.to_string(),
                reason: format!("expected a list, got {}", json_kind(value)),
            });
        }
    }
    Ok(section::<Vec<T>>(map, key)?.filter(|items| !items.is_empty()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
