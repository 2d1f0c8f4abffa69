pub mod environment;
pub mod error;
pub mod explorer;
pub mod logging;
pub mod news;
pub mod render;
pub mod trials;
pub mod util;
pub mod web;

pub use environment::Config;
pub use error::{ExplorerError, Result};
pub use explorer::{Explorer, SearchResults, TrialDetail, TrialView};
pub use news::{NewsClient, NewsItem};
pub use trials::{TrialRecord, TrialsClient};

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_API: &str = "api";
