//! Citation fields derived from a validated case.
//!
//! Every function here is total: missing data resolves to a fixed
//! fallback label instead of an error.

pub mod dates;
pub mod patterns;

use uuid::Uuid;

use crate::models::{CaseRecord, Label};

pub use dates::{first_verdict_date, parse_verdict_timestamp};

/// Fallback for unresolved labels and dates.
pub const UNKNOWN: &str = "Unknown";

/// Fallback for a missing court case number.
pub const UNKNOWN_CASE_NUMBER: &str = "unknown";

/// Fallback author when neither author nor office is set.
pub const DEFAULT_AUTHOR: &str = "Domstol";

/// Fallback title for cases without a headline.
pub const NO_TITLE: &str = "No Title";

/// Public case page on domsdatabasen.dk.
pub const CASE_URL_PREFIX: &str = "https://domsdatabasen.dk/#sag/";

/// Author, falling back to the office name and then to [`DEFAULT_AUTHOR`].
pub fn author(case: &CaseRecord) -> &str {
    case.author
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| case.office_name.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(DEFAULT_AUTHOR)
}

fn label_text(label: Option<&Label>) -> &str {
    label
        .and_then(|l| l.display_text.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN)
}

/// `"{profession}, {instance}, {caseType}"`, each part resolved on its own.
pub fn court_description(case: &CaseRecord) -> String {
    format!(
        "{}, {}, {}",
        label_text(case.profession.as_ref()),
        label_text(case.instance.as_ref()),
        label_text(case.case_type.as_ref())
    )
}

/// Comma-separated subject texts, or [`UNKNOWN`] without subjects.
pub fn subjects(case: &CaseRecord) -> String {
    if case.case_subjects.is_empty() {
        return UNKNOWN.to_string();
    }

    case.case_subjects
        .iter()
        .map(|s| s.display_text.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Verdict date as `YYYY-MM-DD`, or [`UNKNOWN`].
pub fn verdict_date(case: &CaseRecord) -> String {
    first_verdict_date(case).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Court case number, or [`UNKNOWN_CASE_NUMBER`].
pub fn case_number(case: &CaseRecord) -> &str {
    case.court_case_number
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_CASE_NUMBER)
}

/// Entry key for bibliography and Markdown output.
pub fn entry_id(case: &CaseRecord) -> String {
    patterns::NON_WORD
        .replace_all(case_number(case), "")
        .to_lowercase()
}

/// Headline, or [`NO_TITLE`].
pub fn title(case: &CaseRecord) -> &str {
    case.headline
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_TITLE)
}

/// Public URL of the case.
pub fn case_url(case: &CaseRecord) -> String {
    format!("{}{}", CASE_URL_PREFIX, case.id)
}

/// Deterministic EVID directory id for a case id.
pub fn evid_uuid(case_id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, case_id.as_bytes())
}

/// All derived citation fields of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFields {
    pub entry_id: String,
    pub title: String,
    pub author: String,
    pub court: String,
    pub date: String,
    pub subjects: String,
    pub case_number: String,
    pub url: String,
}

impl CaseFields {
    pub fn from_case(case: &CaseRecord) -> Self {
        Self {
            entry_id: entry_id(case),
            title: title(case).to_string(),
            author: author(case).to_string(),
            court: court_description(case),
            date: verdict_date(case),
            subjects: subjects(case),
            case_number: case_number(case).to_string(),
            url: case_url(case),
        }
    }

    /// Whether the verdict date resolved.
    pub fn has_date(&self) -> bool {
        self.date != UNKNOWN
    }
}
