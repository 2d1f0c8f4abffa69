//! HTTP client for the ClinicalTrials.gov v2 API.

use reqwest::{header, StatusCode};
use tokio::time::Duration;
use tracing::{debug, info, warn};

use super::parser::{parse_studies, parse_study};
use super::types::TrialRecord;
use super::util::normalize_nct_id;
use crate::environment::Config;
use crate::error::{ExplorerError, Result};
use crate::TARGET_WEB_REQUEST;

#[derive(Clone, Debug)]
pub struct TrialsClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl TrialsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| ExplorerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.ctgov_api_url, config.trials_timeout)
    }

    /// Keyword search. Returns trials in registry order; sorting is left to the caller.
    pub async fn search(&self, expr: &str, page_size: usize) -> Result<Vec<TrialRecord>> {
        let url = format!("{}/studies", self.base_url);
        info!(target: TARGET_WEB_REQUEST, "Searching trials for {:?} (pageSize {})", expr, page_size);

        let page_size = page_size.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("query.term", expr),
                ("pageSize", page_size.as_str()),
            ])
            .header(header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ExplorerError::http(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: TARGET_WEB_REQUEST, "Non-success status {} from {}", status, url);
            return Err(ExplorerError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExplorerError::http(&url, e))?;
        debug!(target: TARGET_WEB_REQUEST, "Received {} bytes from {}", body.len(), url);

        let trials = parse_studies(&body, &url)?;
        info!(target: TARGET_WEB_REQUEST, "Found {} trials for {:?}", trials.len(), expr);
        Ok(trials)
    }

    /// Fetch one trial by NCT id.
    pub async fn fetch(&self, nct_id: &str) -> Result<TrialRecord> {
        let nct_id = normalize_nct_id(nct_id)?;
        let url = format!("{}/studies/{}", self.base_url, nct_id);
        debug!(target: TARGET_WEB_REQUEST, "Fetching trial {}", nct_id);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json")])
            .header(header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ExplorerError::http(&url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ExplorerError::NotFound(nct_id));
        }
        if !status.is_success() {
            warn!(target: TARGET_WEB_REQUEST, "Non-success status {} from {}", status, url);
            return Err(ExplorerError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExplorerError::http(&url, e))?;

        // An empty document decodes to a blank record
        let trial = parse_study(&body, &url)?;
        if trial.nct_id.is_empty() {
            warn!(target: TARGET_WEB_REQUEST, "Empty study returned for {}", nct_id);
            return Err(ExplorerError::NotFound(nct_id));
        }
        Ok(trial)
    }
}
