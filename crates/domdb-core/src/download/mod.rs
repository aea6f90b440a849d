//! Fetching case pages from the remote API.
//!
//! [`load_next_batch`] resumes after the highest page already on disk, so
//! repeated runs walk the listing one page at a time.

mod client;
mod storage;

pub use client::ApiClient;
pub use storage::{last_saved_page, save_cases};

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::DownloadError;

/// Environment variable holding the API user id.
pub const USER_ID_VAR: &str = "DOMDB_USER_ID";

/// Environment variable holding the API password.
pub const PASSWORD_VAR: &str = "DOMDB_PASSWORD";

/// API login.
#[derive(Clone)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `DOMDB_USER_ID` and `DOMDB_PASSWORD`.
    pub fn from_env() -> Result<Self, DownloadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`; empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DownloadError> {
        let get = |key: &str| lookup(key).filter(|v: &String| !v.is_empty());
        match (get(USER_ID_VAR), get(PASSWORD_VAR)) {
            (Some(user_id), Some(password)) => Ok(Self { user_id, password }),
            _ => Err(DownloadError::MissingCredentials),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .finish()
    }
}

/// A remote listing of raw cases.
#[allow(async_fn_in_trait)]
pub trait CaseSource {
    /// Obtain a bearer token.
    async fn authenticate(&self) -> Result<String, DownloadError>;

    /// Fetch one page of raw cases.
    async fn fetch_cases(
        &self,
        token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>, DownloadError>;
}

/// Fetch the page after the last saved one and store it in `directory`.
///
/// Returns the number of cases fetched; an empty page writes nothing.
pub async fn load_next_batch<S: CaseSource>(
    source: &S,
    directory: &Path,
    batch_size: u32,
) -> Result<usize, DownloadError> {
    info!("Starting to load next batch in directory: {}", directory.display());

    let token = source.authenticate().await?;
    let page = last_saved_page(directory);
    info!("Fetching page {}...", page);

    let cases = source.fetch_cases(&token, page, batch_size).await?;
    if cases.is_empty() {
        info!("No cases fetched");
        return Ok(0);
    }

    for case in &cases {
        let headline = case.get("headline").and_then(Value::as_str).unwrap_or("No headline");
        let id = case.get("id").and_then(Value::as_str).unwrap_or("No ID");
        info!("Fetched case: {} (ID: {})", headline, id);
    }

    save_cases(page, &cases, directory)?;
    info!("Successfully fetched and saved {} cases", cases.len());
    Ok(cases.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<u32, Vec<Value>>,
        fail_auth: bool,
        requests: RefCell<Vec<(String, u32, u32)>>,
    }

    impl CaseSource for FakeSource {
        async fn authenticate(&self) -> Result<String, DownloadError> {
            if self.fail_auth {
                return Err(DownloadError::Auth("HTTP 401 Unauthorized".to_string()));
            }
            Ok("token-1".to_string())
        }

        async fn fetch_cases(
            &self,
            token: &str,
            page: u32,
            per_page: u32,
        ) -> Result<Vec<Value>, DownloadError> {
            self.requests
                .borrow_mut()
                .push((token.to_string(), page, per_page));
            Ok(self.pages.get(&page).cloned().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_load_next_batch_walks_pages() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            pages: HashMap::from([
                (1, vec![json!({"id": "a", "headline": "A"}), json!({"id": "b"})]),
                (2, vec![json!({"id": "c"})]),
            ]),
            ..Default::default()
        };

        assert_eq!(load_next_batch(&source, dir.path(), 25).await.unwrap(), 2);
        assert_eq!(load_next_batch(&source, dir.path(), 25).await.unwrap(), 1);
        assert_eq!(load_next_batch(&source, dir.path(), 25).await.unwrap(), 0);

        assert!(dir.path().join("cases_1.json").exists());
        assert!(dir.path().join("cases_2.json").exists());
        assert!(!dir.path().join("cases_3.json").exists());
        assert_eq!(
            source.requests.borrow().clone(),
            vec![
                ("token-1".to_string(), 1, 25),
                ("token-1".to_string(), 2, 25),
                ("token-1".to_string(), 3, 25),
            ]
        );
    }

    #[tokio::test]
    async fn test_auth_failure_fetches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            fail_auth: true,
            ..Default::default()
        };

        let err = load_next_batch(&source, dir.path(), 10).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get access token: HTTP 401 Unauthorized");
        assert!(source.requests.borrow().is_empty());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let env = HashMap::from([(USER_ID_VAR, "me"), (PASSWORD_VAR, "pw")]);
        let creds = Credentials::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.user_id, "me");
        assert!(!format!("{:?}", creds).contains("pw"));

        let partial = HashMap::from([(USER_ID_VAR, "me"), (PASSWORD_VAR, "")]);
        let err = Credentials::from_lookup(|k| partial.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(err, DownloadError::MissingCredentials));
    }
}
