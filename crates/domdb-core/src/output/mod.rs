//! Output builders for citation and export formats.

mod bib;
mod evid;
mod markdown;

pub use bib::BibRenderer;
pub use evid::{BuildOutcome, EvidBuilder, EvidInfo, clean_text_for_typst};
pub use markdown::MarkdownRenderer;

use serde::{Deserialize, Serialize};

use crate::fields::CaseFields;
use crate::models::CaseRecord;

/// Layout of a generated EVID directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidLayout {
    /// `label.typ` holding all extracted pages.
    #[default]
    Typst,
    /// `label.tex` plus one `verdict_text_{doc}.txt` per document.
    Separate,
}

/// One rendered entry of a single-file export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionEntry {
    /// Deduplication key.
    pub entry_id: String,
    /// Verdict date or `Unknown`.
    pub date: String,
    /// Rendered text of the entry.
    pub body: String,
}

/// Renders one case into an entry of a single-file export.
pub trait EntryRenderer {
    /// Render the entry body.
    fn render(&self, fields: &CaseFields) -> String;

    /// Separator written after every entry.
    fn separator(&self) -> &'static str;

    /// Build a [`ConversionEntry`] for a case.
    fn entry(&self, case: &CaseRecord) -> ConversionEntry {
        let fields = CaseFields::from_case(case);
        let body = self.render(&fields);
        ConversionEntry {
            entry_id: fields.entry_id,
            date: fields.date,
            body,
        }
    }

    /// Concatenate rendered entries into a file body.
    fn document(&self, entries: &[ConversionEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            out.push_str(&entry.body);
            out.push_str(self.separator());
        }
        out
    }
}
