//! Case record models as delivered by the domsdatabasen.dk API.
//!
//! Raw records are loosely shaped: nested objects may be absent, `null` or
//! empty, and the API adds fields we do not model. [`CaseRecord::from_value`]
//! turns one decoded JSON value into a typed record or a [`ValidationError`]
//! naming the offending field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::ValidationError;

/// A validated judicial case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Case id assigned by the source API. Never empty.
    pub id: String,

    /// Case headline.
    pub headline: Option<String>,

    /// Court case number, e.g. `BS-123/2023`.
    pub court_case_number: Option<String>,

    /// Author of the verdict.
    pub author: Option<String>,

    /// Name of the court office.
    pub office_name: Option<String>,

    /// Legal profession (e.g. "Civil").
    pub profession: Option<Label>,

    /// Court instance (e.g. "Byret").
    pub instance: Option<Label>,

    /// Case type.
    pub case_type: Option<Label>,

    /// Subject tags, in source order.
    #[serde(default)]
    pub case_subjects: Vec<Label>,

    /// Attached documents, in source order.
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
}

/// A categorical tag with a human-readable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub display_text: Option<String>,
}

impl Label {
    pub fn new(display_text: impl Into<String>) -> Self {
        Self {
            display_text: Some(display_text.into()),
        }
    }
}

/// One verdict document attached to a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Document id.
    pub id: Option<String>,

    /// Verdict timestamp as `YYYY-MM-DDTHH:MM:SS`.
    pub verdict_date_time: Option<String>,

    /// Document body as HTML.
    pub content_html: Option<String>,

    /// Document body as base64-encoded PDF.
    pub content_pdf: Option<String>,
}

impl CaseRecord {
    /// A case with only its id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            headline: None,
            court_case_number: None,
            author: None,
            office_name: None,
            profession: None,
            instance: None,
            case_type: None,
            case_subjects: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Validate a raw JSON value into a case record.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = value.as_object().ok_or_else(|| ValidationError::InvalidType {
            field: "$".to_string(),
            expected: "object",
        })?;

        let id = opt_string(obj, "id", "")?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::MissingField {
                field: "id".to_string(),
            })?;

        let case_subjects = opt_objects(obj, "caseSubjects", "")?
            .into_iter()
            .map(|(path, item)| label(item, &path))
            .collect::<Result<Vec<_>, _>>()?;

        let documents = opt_objects(obj, "documents", "")?
            .into_iter()
            .map(|(path, item)| document(item, &path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            headline: opt_string(obj, "headline", "")?,
            court_case_number: opt_string(obj, "courtCaseNumber", "")?,
            author: opt_string(obj, "author", "")?,
            office_name: opt_string(obj, "officeName", "")?,
            profession: opt_label(obj, "profession")?,
            instance: opt_label(obj, "instance")?,
            case_type: opt_label(obj, "caseType")?,
            case_subjects,
            documents,
        })
    }
}

fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn opt_string(
    obj: &Map<String, Value>,
    key: &str,
    prefix: &str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::InvalidType {
            field: field_path(prefix, key),
            expected: "string",
        }),
    }
}

fn opt_label(obj: &Map<String, Value>, key: &str) -> Result<Option<Label>, ValidationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => label(value, key).map(Some),
        Some(_) => Err(ValidationError::InvalidType {
            field: key.to_string(),
            expected: "object",
        }),
    }
}

/// Elements of an optional array of objects, paired with their paths.
fn opt_objects<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    prefix: &str,
) -> Result<Vec<(String, &'a Value)>, ValidationError> {
    let path = field_path(prefix, key);
    let items = match obj.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::InvalidType {
                field: path,
                expected: "array",
            });
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{}[{}]", path, i);
            if item.is_object() {
                Ok((item_path, item))
            } else {
                Err(ValidationError::InvalidType {
                    field: item_path,
                    expected: "object",
                })
            }
        })
        .collect()
}

fn label(value: &Value, path: &str) -> Result<Label, ValidationError> {
    let obj = value.as_object().ok_or_else(|| ValidationError::InvalidType {
        field: path.to_string(),
        expected: "object",
    })?;

    Ok(Label {
        display_text: opt_string(obj, "displayText", path)?,
    })
}

fn document(value: &Value, path: &str) -> Result<DocumentRecord, ValidationError> {
    let obj = value.as_object().ok_or_else(|| ValidationError::InvalidType {
        field: path.to_string(),
        expected: "object",
    })?;

    // A malformed timestamp degrades to "Unknown" later on, so a
    // non-string value here is dropped instead of rejected.
    let verdict_date_time = match obj.get("verdictDateTime") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => {
            trace!(field = %field_path(path, "verdictDateTime"), value = %other, "Ignoring non-string timestamp");
            None
        }
    };

    Ok(DocumentRecord {
        id: opt_string(obj, "id", path)?,
        verdict_date_time,
        content_html: opt_string(obj, "contentHtml", path)?.filter(|s| !s.is_empty()),
        content_pdf: opt_string(obj, "contentPdf", path)?.filter(|s| !s.is_empty()),
    })
}
