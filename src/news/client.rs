//! HTTP client for the Google News RSS search endpoint.

use reqwest::header;
use tokio::time::Duration;
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

use super::parser::parse_news_feed;
use super::types::{NewsItem, EDITION, USER_AGENT};
use super::util::build_news_query;
use crate::environment::Config;
use crate::error::{ExplorerError, Result};
use crate::TARGET_WEB_REQUEST;

#[derive(Clone, Debug)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    limit: usize,
}

impl NewsClient {
    pub fn new(base_url: &str, timeout: Duration, limit: usize) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ExplorerError::Config(format!("Invalid news URL {}: {}", base_url, e)))?;
        let http = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| ExplorerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            timeout,
            limit,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.news_rss_url, config.news_timeout, config.news_limit)
    }

    /// Search URL for a query, pinned to the US English edition.
    pub fn search_url(&self, query: &str) -> Url {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .append_pair("hl", "en-US")
            .append_pair("gl", "US")
            .finish();
        // `ceid` goes out unencoded
        let mut url = self.base_url.clone();
        url.set_query(Some(&format!("{}&ceid={}", params, EDITION)));
        url
    }

    /// Fetch and parse news for a free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<NewsItem>> {
        let url = self.search_url(query);
        debug!(target: TARGET_WEB_REQUEST, "Loading news feed from {}", url);

        let response = self
            .http
            .get(url.clone())
            .header(header::USER_AGENT, USER_AGENT)
            .header(
                header::ACCEPT,
                "application/rss+xml, application/atom+xml, application/xml, text/xml, */*;q=0.9",
            )
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ExplorerError::http(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExplorerError::http(url.as_str(), e))?;
        parse_news_feed(&body, self.limit)
    }

    /// News related to a trial's drug and condition terms. Failures are
    /// logged and produce an empty list.
    pub async fn related(&self, drug: &str, condition: &str) -> Vec<NewsItem> {
        let query = build_news_query(drug, condition);
        match self.search(&query).await {
            Ok(items) => {
                info!(target: TARGET_WEB_REQUEST, "Found {} news items for {:?}", items.len(), query);
                items
            }
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "News lookup for {:?} failed: {}", query, err);
                Vec::new()
            }
        }
    }
}
