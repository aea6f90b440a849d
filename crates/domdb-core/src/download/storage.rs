//! Page files in the local cases directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::DownloadError;

const PAGE_FILE_PREFIX: &str = "cases_";

/// Next page to fetch: one past the highest saved `cases_N.json`.
///
/// Starts over at page 1 when the directory is missing, holds no page
/// files, or any page file name does not parse.
pub fn last_saved_page(directory: &Path) -> u32 {
    info!("Checking last saved page in directory: {}", directory.display());

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(_) => {
            info!("Directory does not exist, starting from page 1");
            return 1;
        }
    };

    let names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with(PAGE_FILE_PREFIX))
        .collect();

    if names.is_empty() {
        info!("No case files found, starting from page 1");
        return 1;
    }

    let pages: Option<Vec<u32>> = names.iter().map(|name| page_number(name)).collect();
    match pages.and_then(|p| p.into_iter().max()) {
        Some(max) => max.saturating_add(1),
        None => {
            warn!("Error parsing file names, starting from page 1");
            1
        }
    }
}

fn page_number(name: &str) -> Option<u32> {
    let last = name.rsplit('_').next()?;
    last.split('.').next()?.parse().ok()
}

/// Write one fetched page as pretty JSON to `cases_{page}.json`.
pub fn save_cases(page: u32, cases: &[Value], directory: &Path) -> Result<PathBuf, DownloadError> {
    info!("Saving {} cases to directory: {}", cases.len(), directory.display());

    fs::create_dir_all(directory).map_err(|e| DownloadError::Storage(e.to_string()))?;
    let path = directory.join(format!("{}{}.json", PAGE_FILE_PREFIX, page));
    let content =
        serde_json::to_string_pretty(cases).map_err(|e| DownloadError::Storage(e.to_string()))?;
    fs::write(&path, content).map_err(|e| DownloadError::Storage(e.to_string()))?;

    info!("Saved {} cases to {}", cases.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_directory_starts_at_one() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(last_saved_page(&dir.path().join("nope")), 1);
        assert_eq!(last_saved_page(dir.path()), 1);
    }

    #[test]
    fn test_next_page_after_highest() {
        let dir = tempfile::tempdir().unwrap();
        for n in [1, 3, 2] {
            save_cases(n, &[json!({"id": n})], dir.path()).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        assert_eq!(last_saved_page(dir.path()), 4);
    }

    #[test]
    fn test_unparseable_name_starts_over() {
        let dir = tempfile::tempdir().unwrap();
        save_cases(7, &[], dir.path()).unwrap();
        fs::write(dir.path().join("cases_backup.json"), "[]").unwrap();
        assert_eq!(last_saved_page(dir.path()), 1);
    }

    #[test]
    fn test_highest_page_does_not_overflow() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(format!("cases_{}.json", u32::MAX)), "[]").unwrap();
        assert_eq!(last_saved_page(dir.path()), u32::MAX);
    }

    #[test]
    fn test_save_cases_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cases");
        let path = save_cases(2, &[json!({"id": "a", "headline": "Æblesag"})], &target).unwrap();

        assert_eq!(path, target.join("cases_2.json"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  {"));
        assert!(content.contains("Æblesag"));
        let parsed: Vec<Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["id"], "a");
    }
}
