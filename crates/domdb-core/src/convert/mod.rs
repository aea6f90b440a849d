//! Batch conversion of downloaded case files.
//!
//! Every mode runs the same pipeline: enumerate `*.json` in a directory,
//! validate records, optionally cap the count, then render. Bad files and
//! bad records are logged and dropped; only a missing input set or a
//! failed write aborts a run.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::ConversionError;
use crate::models::CaseRecord;
use crate::output::{
    BibRenderer, BuildOutcome, ConversionEntry, EntryRenderer, EvidBuilder, EvidLayout,
    MarkdownRenderer,
};

/// List the `*.json` files directly inside `dir`, sorted by path.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, ConversionError> {
    info!("Loading verdicts from directory: {}", dir.display());

    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConversionError::NoInputFiles(dir.to_path_buf()));
        }
        Err(e) => {
            return Err(ConversionError::ReadInput {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    };

    let mut files: Vec<PathBuf> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_visible_json(p))
        .collect();
    files.sort();

    info!("Found {} JSON files", files.len());
    if files.is_empty() {
        return Err(ConversionError::NoInputFiles(dir.to_path_buf()));
    }
    Ok(files)
}

fn is_visible_json(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|n| n.starts_with('.'));
    !hidden && path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Read one input file as an array of raw records.
fn read_raw_cases(path: &Path) -> Option<Vec<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Skipping unreadable file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(items)) => Some(items),
        Ok(_) => {
            warn!("Skipping {}: expected a JSON array of cases", path.display());
            None
        }
        Err(e) => {
            warn!("Skipping {}: invalid JSON: {}", path.display(), e);
            None
        }
    }
}

/// Validate the records of every file, in file order.
///
/// With `cap > 0`, loading stops once `cap` valid records are collected.
pub fn load_cases(files: &[PathBuf], cap: usize) -> Vec<CaseRecord> {
    let mut cases = Vec::new();

    'files: for path in files {
        info!("Processing file: {}", path.display());
        let Some(raw) = read_raw_cases(path) else {
            continue;
        };
        debug!("Loaded {} raw cases from {}", raw.len(), path.display());

        let mut valid = 0usize;
        for value in &raw {
            if cap > 0 && cases.len() >= cap {
                info!("Processed {} valid cases from {}", valid, path.display());
                break 'files;
            }
            match CaseRecord::from_value(value) {
                Ok(case) => {
                    cases.push(case);
                    valid += 1;
                }
                Err(e) => error!("Invalid case data: {}", e),
            }
        }
        info!("Processed {} valid cases from {}", valid, path.display());
    }

    cases
}

/// Keep the first entry for every entry id, preserving order.
pub fn dedup_by_entry_id(entries: Vec<ConversionEntry>) -> Vec<ConversionEntry> {
    let mut seen = HashSet::new();
    let unique: Vec<_> = entries
        .into_iter()
        .filter(|e| seen.insert(e.entry_id.clone()))
        .collect();
    info!("After deduplication: {} unique cases", unique.len());
    unique
}

/// Keep the first case for every case id, preserving order.
pub fn dedup_by_case_id(cases: Vec<CaseRecord>) -> Vec<CaseRecord> {
    let mut seen = HashSet::new();
    let unique: Vec<_> = cases
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .collect();
    debug!("After deduplication: {} unique case ids", unique.len());
    unique
}

/// Known dates newest first, then undated entries in their original order.
pub fn order_by_date(entries: Vec<ConversionEntry>) -> Vec<ConversionEntry> {
    let (mut known, unknown): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|e| e.date != crate::fields::UNKNOWN);
    info!(
        "Cases with known dates: {}, unknown: {}",
        known.len(),
        unknown.len()
    );

    // stable: equal dates keep input order
    known.sort_by(|a, b| b.date.cmp(&a.date));
    known.extend(unknown);
    known
}

fn prepare_entries<R: EntryRenderer>(
    renderer: &R,
    directory: &Path,
    number: usize,
) -> Result<Vec<ConversionEntry>, ConversionError> {
    let files = discover_inputs(directory)?;
    let entries = load_cases(&files, number)
        .iter()
        .map(|case| renderer.entry(case))
        .collect();
    Ok(order_by_date(dedup_by_entry_id(entries)))
}

fn write_output(path: &Path, content: &str) -> Result<(), ConversionError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConversionError::write(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ConversionError::write(path, e))
}

/// Convert a directory of case files into one BibTeX file.
///
/// Returns the number of unique entries written.
pub fn convert_to_bib(
    directory: &Path,
    output: &Path,
    number: usize,
) -> Result<usize, ConversionError> {
    let entries = prepare_entries(&BibRenderer, directory, number)?;

    info!("Writing BibTeX output to {}", output.display());
    write_output(output, &BibRenderer.document(&entries))?;
    info!("Converted {} unique cases to {}", entries.len(), output.display());
    Ok(entries.len())
}

/// Convert a directory of case files into Markdown.
///
/// With `split_by_year`, entries go to `cases_{year}.md` files next to
/// `output` (`cases_unknown.md` for undated entries) and `output` itself is
/// not written.
pub fn convert_to_md(
    directory: &Path,
    output: &Path,
    number: usize,
    split_by_year: bool,
) -> Result<usize, ConversionError> {
    let entries = prepare_entries(&MarkdownRenderer, directory, number)?;

    if !split_by_year {
        info!("Writing Markdown output to {}", output.display());
        write_output(output, &MarkdownRenderer.document(&entries))?;
        info!("Converted {} unique cases to {}", entries.len(), output.display());
        return Ok(entries.len());
    }

    info!("Splitting output by year");
    let mut groups: BTreeMap<String, Vec<ConversionEntry>> = BTreeMap::new();
    let total = entries.len();
    for entry in entries {
        groups.entry(year_bucket(&entry.date)).or_default().push(entry);
    }

    let dir = output.parent().unwrap_or_else(|| Path::new(""));
    for (year, group) in &groups {
        let path = dir.join(format!("cases_{}.md", year));
        write_output(&path, &MarkdownRenderer.document(group))?;
        info!("Wrote {} cases to {}", group.len(), path.display());
    }

    Ok(total)
}

fn year_bucket(date: &str) -> String {
    if date == crate::fields::UNKNOWN {
        return "unknown".to_string();
    }
    date.chars().take(4).collect()
}

/// Convert a directory of case files into EVID directories under `output`.
///
/// Cases are built on blocking workers, at most `jobs` at a time. Returns
/// the number of directories created; existing ones are skipped.
pub async fn convert_to_evid(
    directory: &Path,
    output: &Path,
    number: usize,
    layout: EvidLayout,
    jobs: usize,
) -> Result<usize, ConversionError> {
    let files = discover_inputs(directory)?;
    let cases = dedup_by_case_id(load_cases(&files, number));
    if cases.is_empty() {
        info!("No valid cases to process");
        return Ok(0);
    }

    let builder = Arc::new(EvidBuilder::new(output).with_layout(layout));
    let jobs = jobs.max(1);
    debug!(cases = cases.len(), jobs, "Starting EVID conversion");

    let outcomes: Vec<Result<BuildOutcome, ConversionError>> = stream::iter(cases)
        .map(|case| {
            let builder = Arc::clone(&builder);
            async move {
                tokio::task::spawn_blocking(move || builder.build(&case))
                    .await
                    .map_err(|e| ConversionError::Worker(e.to_string()))?
            }
        })
        .buffer_unordered(jobs)
        .collect()
        .await;

    let mut created = 0;
    for outcome in outcomes {
        if outcome?.is_created() {
            created += 1;
        }
    }

    info!("Converted {} cases to EVID in {}", created, output.display());
    Ok(created)
}
