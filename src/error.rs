//! Error type shared by the trial lookup, news enrichment and HTTP layers.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Transport-level failure talking to an upstream service.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Upstream body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("trial {0} not found")]
    NotFound(String),

    #[error("invalid NCT id: {0:?}")]
    InvalidNctId(String),

    /// Malformed request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// News feed body was neither RSS nor Atom.
    #[error("failed to parse news feed: {0}")]
    Feed(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ExplorerError {
    pub(crate) fn http(url: &str, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn decode(url: &str, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// True when the failure came from an upstream service rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::Decode { .. } | Self::Feed(_)
        )
    }
}
