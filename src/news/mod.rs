//! Related news lookup through the Google News RSS search endpoint.

mod client;
mod parser;
mod types;
mod util;

pub use self::client::NewsClient;
pub use self::parser::parse_news_feed;
pub use self::types::*;
pub use self::util::{build_news_query, clean_html, cleanup_xml};
