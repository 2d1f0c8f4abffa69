use std::env;
use tokio::time::Duration;

use crate::error::{ExplorerError, Result};
use crate::util::is_valid_url;

pub const DEFAULT_CTGOV_API_URL: &str = "https://clinicaltrials.gov/api/v2";
pub const DEFAULT_NEWS_RSS_URL: &str = "https://news.google.com/rss/search";

/// Runtime configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub ctgov_api_url: String,
    pub news_rss_url: String,
    pub trials_timeout: Duration,
    pub news_timeout: Duration,
    /// Number of studies requested from the registry per search.
    pub fetch_limit: usize,
    /// Number of news items kept per trial.
    pub news_limit: usize,
    pub port: u16,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ctgov_api_url: DEFAULT_CTGOV_API_URL.to_string(),
            news_rss_url: DEFAULT_NEWS_RSS_URL.to_string(),
            trials_timeout: Duration::from_secs(20),
            news_timeout: Duration::from_secs(10),
            fetch_limit: 200,
            news_limit: 5,
            port: 8080,
            log_dir: "logs".to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration from environment variables, falling back to defaults
    /// for anything unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let ctgov_api_url = match get("CTGOV_API_URL") {
            Some(url) => validated_url("CTGOV_API_URL", url)?,
            None => defaults.ctgov_api_url,
        };
        let news_rss_url = match get("NEWS_RSS_URL") {
            Some(url) => validated_url("NEWS_RSS_URL", url)?,
            None => defaults.news_rss_url,
        };

        let trials_timeout = match get("TRIALS_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("TRIALS_TIMEOUT_SECS", &v)?),
            None => defaults.trials_timeout,
        };
        let news_timeout = match get("NEWS_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("NEWS_TIMEOUT_SECS", &v)?),
            None => defaults.news_timeout,
        };
        let fetch_limit = match get("FETCH_LIMIT") {
            Some(v) => parse_number("FETCH_LIMIT", &v)?,
            None => defaults.fetch_limit,
        };
        let news_limit = match get("NEWS_LIMIT") {
            Some(v) => parse_number("NEWS_LIMIT", &v)?,
            None => defaults.news_limit,
        };
        let port = match get("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => defaults.port,
        };
        let log_dir = get("LOG_DIR").unwrap_or(defaults.log_dir);

        Ok(Self {
            ctgov_api_url,
            news_rss_url,
            trials_timeout,
            news_timeout,
            fetch_limit,
            news_limit,
            port,
            log_dir,
        })
    }
}

fn validated_url(key: &str, value: String) -> Result<String> {
    if is_valid_url(&value) {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ExplorerError::Config(format!(
            "{} must be an http(s) URL, got {:?}",
            key, value
        )))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| ExplorerError::Config(format!("{} must be a number, got {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.ctgov_api_url, DEFAULT_CTGOV_API_URL);
        assert_eq!(config.news_rss_url, DEFAULT_NEWS_RSS_URL);
        assert_eq!(config.fetch_limit, 200);
        assert_eq!(config.news_limit, 5);
        assert_eq!(config.trials_timeout, Duration::from_secs(20));
        assert_eq!(config.news_timeout, Duration::from_secs(10));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CTGOV_API_URL", "http://localhost:9000/api/v2/"),
            ("FETCH_LIMIT", "50"),
            ("PORT", " 3000 "),
            ("NEWS_LIMIT", ""),
        ]))
        .unwrap();
        assert_eq!(config.ctgov_api_url, "http://localhost:9000/api/v2");
        assert_eq!(config.fetch_limit, 50);
        assert_eq!(config.port, 3000);
        assert_eq!(config.news_limit, 5);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ExplorerError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("NEWS_RSS_URL", "ftp://news.example.org")])),
            Err(ExplorerError::Config(_))
        ));
    }
}
