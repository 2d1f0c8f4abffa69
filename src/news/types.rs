//! Type definitions for the news module.

use serde::{Deserialize, Serialize};

/// Every news query is anchored with this phrase.
pub const QUERY_ANCHOR: &str = "clinical trial";

/// Summaries are cut to this many characters after HTML is stripped.
pub const SUMMARY_CHARS: usize = 260;

/// Google News edition (country:language) sent as `ceid`.
pub const EDITION: &str = "US:en";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// A news article matched to a trial by keyword at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Publisher name, when the feed exposes one.
    pub source: Option<String>,
    /// RFC 3339 publication time, when the feed provides a parseable one.
    pub published: Option<String>,
    pub summary: String,
}
