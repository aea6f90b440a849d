//! EVID evidence directories.
//!
//! Each case becomes `{base}/{uuid}/` where the UUID is derived from the
//! case id. A directory is assembled in a hidden staging directory next to
//! its target and renamed into place, so a target that exists is always
//! complete and an existing target means the case was already converted.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::EvidLayout;
use crate::error::ConversionError;
use crate::fields::{self, CaseFields, patterns};
use crate::models::{CaseRecord, DocumentRecord};
use crate::text;

const TYPST_TEMPLATE_HEADER: &str = "#import \"@local/labtyp:0.1.0\": lablist, lab, mset\n\n";

/// Metadata sidecar written as `info.yml`.
///
/// Fields are declared alphabetically so the YAML keys come out sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidInfo {
    pub authors: String,
    pub dates: String,
    pub label: String,
    pub original_name: String,
    pub tags: String,
    pub time_added: String,
    pub title: String,
    pub url: String,
    pub uuid: String,
}

impl EvidInfo {
    pub fn from_case(case: &CaseRecord, fields: &CaseFields) -> Self {
        Self {
            authors: fields.author.clone(),
            dates: fields.date.clone(),
            label: fields.court.clone(),
            original_name: fields.case_number.clone(),
            tags: fields.subjects.clone(),
            time_added: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            title: fields.title.clone(),
            url: fields.url.clone(),
            uuid: fields::evid_uuid(&case.id).to_string(),
        }
    }
}

/// Result of building one EVID directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The directory was written.
    Created(PathBuf),
    /// The directory already existed; nothing was written.
    Skipped(PathBuf),
}

impl BuildOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Builds EVID directories under a base directory.
#[derive(Debug, Clone)]
pub struct EvidBuilder {
    base: PathBuf,
    layout: EvidLayout,
}

impl EvidBuilder {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            layout: EvidLayout::default(),
        }
    }

    /// Set the directory layout.
    pub fn with_layout(mut self, layout: EvidLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Target directory for a case.
    pub fn target_dir(&self, case: &CaseRecord) -> PathBuf {
        self.base.join(fields::evid_uuid(&case.id).to_string())
    }

    /// Build the directory for one case, or skip it if it exists.
    pub fn build(&self, case: &CaseRecord) -> Result<BuildOutcome, ConversionError> {
        let target = self.target_dir(case);
        if target.exists() {
            info!("Skipping existing EVID directory: {}", target.display());
            return Ok(BuildOutcome::Skipped(target));
        }

        fs::create_dir_all(&self.base).map_err(|e| ConversionError::write(&self.base, e))?;

        let staging = tempfile::Builder::new()
            .prefix(".evid-")
            .tempdir_in(&self.base)
            .map_err(|e| ConversionError::write(&self.base, e))?;

        self.write_contents(case, staging.path())?;

        if let Err(e) = fs::rename(staging.path(), &target) {
            // Another worker finished the same case first
            if target.exists() {
                debug!("Lost race for {}: {}", target.display(), e);
                info!("Skipping existing EVID directory: {}", target.display());
                return Ok(BuildOutcome::Skipped(target));
            }
            return Err(ConversionError::write(&target, e));
        }

        info!("Created EVID directory: {}", target.display());
        Ok(BuildOutcome::Created(target))
    }

    fn write_contents(&self, case: &CaseRecord, dir: &Path) -> Result<(), ConversionError> {
        let fields = CaseFields::from_case(case);

        let case_json =
            serde_json::to_string_pretty(case).map_err(|e| ConversionError::Serialize {
                what: "case.json",
                reason: e.to_string(),
            })?;
        write_file(&dir.join("case.json"), &case_json)?;

        let info = EvidInfo::from_case(case, &fields);
        let info_yaml = serde_yaml::to_string(&info).map_err(|e| ConversionError::Serialize {
            what: "info.yml",
            reason: e.to_string(),
        })?;
        write_file(&dir.join("info.yml"), &info_yaml)?;

        match self.layout {
            EvidLayout::Typst => {
                let pages: Vec<String> = case.documents.iter().flat_map(text::document_pages).collect();
                write_file(&dir.join("label.typ"), &typst_label(&info, &pages))?;
            }
            EvidLayout::Separate => {
                write_file(&dir.join("label.tex"), &tex_label(case, &fields))?;
                for (index, doc) in case.documents.iter().enumerate() {
                    if let Some(text) = text::document_text(doc) {
                        let name = format!("verdict_text_{}.txt", text_file_stem(doc, index));
                        write_file(&dir.join(name), &text)?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// File-name part for a document's text file.
///
/// Non-word runs in the id become `_`; an id with nothing left falls back
/// to the document's position.
fn text_file_stem(doc: &DocumentRecord, index: usize) -> String {
    let Some(id) = doc.id.as_deref() else {
        return "unknown".to_string();
    };
    let stem = patterns::NON_WORD.replace_all(id, "_");
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        format!("doc{}", index + 1)
    } else {
        stem.to_string()
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ConversionError> {
    fs::write(path, content).map_err(|e| ConversionError::write(path, e))
}

/// Escape text so Typst renders it literally.
pub fn clean_text_for_typst(text: &str) -> String {
    let escaped = patterns::TYPST_SPECIAL.replace_all(text, "\\$0");
    patterns::TYPST_LINE_MARKER
        .replace_all(&escaped, "$1\\$2")
        .into_owned()
}

fn typst_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Body of `label.typ`: one marked section per page.
fn typst_body(pages: &[String]) -> String {
    if pages.is_empty() {
        return "#mset(values: (opage: 1))\n== Page 1\nNo content available\n\n".to_string();
    }

    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            format!(
                "#mset(values: (opage: {n}))\n== Page {n}\n{}\n\n",
                clean_text_for_typst(page),
                n = i + 1
            )
        })
        .collect()
}

fn typst_label(info: &EvidInfo, pages: &[String]) -> String {
    let title = info.label.replace('_', " ");
    format!(
        "{}#mset(values: (\n  title: \"{}\",\n  date: \"{}\"))\n\n= {}\n\n{}\n\n= List of Labels\n#lablist()\n",
        TYPST_TEMPLATE_HEADER,
        typst_string(&title),
        typst_string(&info.dates),
        clean_text_for_typst(&title),
        typst_body(pages)
    )
}

/// Escape LaTeX special characters in plain text.
fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

fn tex_label(case: &CaseRecord, fields: &CaseFields) -> String {
    let case_number = case
        .court_case_number
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(crate::fields::UNKNOWN);

    format!(
        "\\label{{case-{}}}\n\n\\textbf{{{}}}\\\\\nCase Number: {}\\\\\nDate: {}\n",
        case.id,
        escape_latex(&fields.title),
        escape_latex(case_number),
        fields.date
    )
}
