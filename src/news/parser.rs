//! Feed parsing for news search results (RSS or Atom).

use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use std::io::Cursor;
use tracing::{debug, warn};

use super::types::{NewsItem, SUMMARY_CHARS};
use super::util::{clean_html, cleanup_xml, split_publisher};
use crate::error::{ExplorerError, Result};
use crate::util::truncate_chars;
use crate::TARGET_WEB_REQUEST;

/// Parse a news feed body and keep the first `limit` usable entries.
pub fn parse_news_feed(body: &str, limit: usize) -> Result<Vec<NewsItem>> {
    let feed = parse_feed(body)?;
    debug!(target: TARGET_WEB_REQUEST, "Parsed news feed with {} entries", feed.entries.len());

    Ok(feed
        .entries
        .into_iter()
        .filter_map(news_item)
        .take(limit)
        .collect())
}

fn parse_feed(body: &str) -> Result<Feed> {
    match parser::parse(Cursor::new(body.as_bytes())) {
        Ok(feed) => Ok(feed),
        Err(first_err) => {
            let cleaned = cleanup_xml(body);
            if !(cleaned.contains("<rss") || cleaned.contains("<feed")) {
                let preview: String = body.chars().take(100).collect();
                return Err(ExplorerError::Feed(format!(
                    "not an RSS or Atom document: {}",
                    preview
                )));
            }

            match parser::parse(Cursor::new(cleaned.as_bytes())) {
                Ok(feed) => {
                    warn!(target: TARGET_WEB_REQUEST, "News feed parsed only after XML cleanup");
                    Ok(feed)
                }
                Err(second_err) => Err(ExplorerError::Feed(format!(
                    "{} (after cleanup: {})",
                    first_err, second_err
                ))),
            }
        }
    }
}

/// Entries without a title or link are dropped.
fn news_item(entry: Entry) -> Option<NewsItem> {
    let title = entry.title.map(|t| t.content.trim().to_string())?;
    let link = entry.links.first().map(|l| l.href.clone())?;
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let raw_summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();
    let cleaned = clean_html(&raw_summary);
    let (summary, _) = truncate_chars(&cleaned, SUMMARY_CHARS);

    let source = split_publisher(&title).map(str::to_string);
    let published = entry.published.map(|d| d.to_rfc3339());

    Some(NewsItem {
        source,
        published,
        summary: summary.trim_end().to_string(),
        title,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rss_item(i: usize) -> String {
        format!(
            r##"<item>
                <title>Story {i} about a trial - Example News</title>
                <link>https://news.example.org/story-{i}</link>
                <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate>
                <description>&lt;a href="https://news.example.org/story-{i}"&gt;Story {i}&lt;/a&gt;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Example News&lt;/font&gt;</description>
            </item>"##
        )
    }

    fn rss(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <rss version="2.0"><channel><title>"query" - Google News</title>
            <link>https://news.google.com</link><description>Google News</description>
            {items}
            </channel></rss>"#
        )
    }

    #[test]
    fn test_parses_items() {
        let body = rss(&rss_item(1));
        let items = parse_news_feed(&body, 5).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.title, "Story 1 about a trial - Example News");
        assert_eq!(item.link, "https://news.example.org/story-1");
        assert_eq!(item.source.as_deref(), Some("Example News"));
        assert_eq!(item.published.as_deref(), Some("2025-01-06T10:00:00+00:00"));
        assert_eq!(item.summary, "Story 1 Example News");
    }

    #[test]
    fn test_summary_entities_are_decoded() {
        let item = r##"<item>
                <title>Drug works - Reuters</title>
                <link>https://news.example.org/drug-works</link>
                <description>&lt;a href="https://news.example.org/drug-works"&gt;Drug works&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt; &amp;amp; more</description>
            </item>"##;
        let parsed = parse_news_feed(&rss(item), 5).unwrap();
        assert_eq!(parsed[0].summary, "Drug works  Reuters & more");
    }

    #[test]
    fn test_unparseable_pub_date_is_absent() {
        let item = "<item><title>Undated</title><link>https://news.example.org/undated</link><pubDate>sometime last week</pubDate></item>";
        let parsed = parse_news_feed(&rss(item), 5).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].published, None);
    }

    #[test]
    fn test_limits_entries() {
        let items: String = (0..8).map(rss_item).collect();
        let parsed = parse_news_feed(&rss(&items), 5).unwrap();
        assert_eq!(parsed.len(), 5);
        assert_eq!(parsed[4].link, "https://news.example.org/story-4");
    }

    #[test]
    fn test_truncates_summary() {
        let long = "word ".repeat(100);
        let item = format!(
            "<item><title>Long</title><link>https://news.example.org/long</link><description>{}</description></item>",
            long
        );
        let parsed = parse_news_feed(&rss(&item), 5).unwrap();
        assert!(parsed[0].summary.chars().count() <= SUMMARY_CHARS);
        assert!(parsed[0].published.is_none());
        assert!(parsed[0].source.is_none());
    }

    #[test]
    fn test_atom_feed() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
            <feed xmlns="http://www.w3.org/2005/Atom">
              <title>Trial news</title>
              <id>urn:uuid:feed</id>
              <updated>2025-02-01T00:00:00Z</updated>
              <entry>
                <title>Atom story</title>
                <id>urn:uuid:entry</id>
                <link href="https://news.example.org/atom"/>
                <published>2025-02-01T00:00:00Z</published>
                <updated>2025-02-01T00:00:00Z</updated>
                <summary>Plain summary</summary>
              </entry>
            </feed>"#;
        let parsed = parse_news_feed(body, 5).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].summary, "Plain summary");
        assert_eq!(parsed[0].published.as_deref(), Some("2025-02-01T00:00:00+00:00"));
    }

    #[test]
    fn test_rejects_non_feed() {
        let err = parse_news_feed("<html><body>captcha</body></html>", 5).unwrap_err();
        assert!(matches!(err, ExplorerError::Feed(_)));
    }
}
