//! HTTP client for the domsdatabasen.dk case API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{CaseSource, Credentials};
use crate::error::DownloadError;
use crate::models::ApiConfig;

#[derive(Serialize)]
struct AuthRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token_string: String,
}

/// Authenticated access to the case API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    /// Build a client; requests time out after `config.timeout_secs`.
    pub fn new(config: &ApiConfig, credentials: Credentials) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("domdb/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DownloadError::Fetch(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

impl CaseSource for ApiClient {
    async fn authenticate(&self) -> Result<String, DownloadError> {
        let body = AuthRequest {
            email: &self.credentials.user_id,
            password: &self.credentials.password,
        };

        let response = self
            .client
            .post(self.url("autoriser"))
            .json(&body)
            .send()
            .await
            .map_err(|e| DownloadError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::Auth(format!("HTTP {}", response.status())));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| DownloadError::Auth(e.to_string()))?;

        info!("Successfully obtained access token");
        Ok(auth.token_string)
    }

    async fn fetch_cases(
        &self,
        token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>, DownloadError> {
        debug!(page, per_page, "Requesting cases");

        let response = self
            .client
            .get(self.url("sager"))
            .bearer_auth(token)
            .query(&[("sideNr", page), ("perSide", per_page)])
            .send()
            .await
            .map_err(|e| DownloadError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::Fetch(format!("HTTP {}", response.status())));
        }

        let cases: Vec<Value> = response
            .json()
            .await
            .map_err(|e| DownloadError::Fetch(e.to_string()))?;

        info!("Fetched {} cases from page {}", cases.len(), page);
        Ok(cases)
    }
}
