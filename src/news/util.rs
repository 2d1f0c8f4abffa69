//! Utility functions for news lookup.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::QUERY_ANCHOR;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").unwrap());

/// Strip HTML tags, decode entities and trim. Non-breaking spaces become
/// plain spaces.
pub fn clean_html(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    html_escape::decode_html_entities(&stripped)
        .replace('\u{00A0}', " ")
        .trim()
        .to_string()
}

/// Build the news search phrase for a trial: drug terms, condition terms, then
/// the fixed anchor. Blank parts are dropped.
pub fn build_news_query(drug: &str, condition: &str) -> String {
    [drug.trim(), condition.trim(), QUERY_ANCHOR]
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean up malformed XML
pub fn cleanup_xml(xml: &str) -> String {
    let mut cleaned = xml.trim().trim_start_matches('\u{FEFF}').to_string();

    // Drop anything ahead of the document start
    if let Some(xml_start) = cleaned.find("<?xml") {
        cleaned = cleaned[xml_start..].to_string();
    } else if let Some(rss_start) = cleaned.find("<rss") {
        cleaned = cleaned[rss_start..].to_string();
    } else if let Some(feed_start) = cleaned.find("<feed") {
        cleaned = cleaned[feed_start..].to_string();
    }

    // HTML entities that are undefined in XML
    cleaned = cleaned
        .replace("&nbsp;", "&#160;")
        .replace("&ndash;", "&#8211;")
        .replace("&mdash;", "&#8212;")
        .replace("&rsquo;", "&#8217;")
        .replace("&lsquo;", "&#8216;")
        .replace("&rdquo;", "&#8221;")
        .replace("&ldquo;", "&#8220;")
        .replace("&amp;amp;", "&amp;");

    cleaned
        .chars()
        .filter(|&c| {
            matches!(c,
                '\u{0009}' |
                '\u{000A}' |
                '\u{000D}' |
                '\u{0020}'..='\u{D7FF}' |
                '\u{E000}'..='\u{FFFD}' |
                '\u{10000}'..='\u{10FFFF}'
            )
        })
        .collect()
}

/// Google News titles end in `" - Publisher"`; split that suffix off.
pub(crate) fn split_publisher(title: &str) -> Option<&str> {
    title
        .rsplit_once(" - ")
        .map(|(_, publisher)| publisher.trim())
        .filter(|publisher| !publisher.is_empty())
}
