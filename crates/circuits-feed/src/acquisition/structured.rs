// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Read publication metadata from a detail page's raw HTML.
//!
//! Pulls the first usable publication date out of meta tags, `<time>`
//! elements and JSON-LD, plus a short fallback description for items the
//! listing page left undescribed. Uses the `scraper` crate, whose types are
//! `!Send`, so everything here is synchronous and returns owned data.

use crate::acquisition::encoding::clean_text;
use crate::dates::parse_datetime;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Longest fallback description taken from a detail page, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Meta tags carrying a publication date, most specific first.
const DATE_META_SELECTORS: [&str; 5] = [
    r#"meta[property="article:published_time"]"#,
    r#"meta[name="pubdate"]"#,
    r#"meta[name="date"]"#,
    r#"meta[property="og:updated_time"]"#,
    r#"meta[property="article:modified_time"]"#,
];

/// Everything the enricher needs from one detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailMetadata {
    /// First parseable structured publication date.
    pub published_at: Option<DateTime<Utc>>,
    /// First paragraph (or meta description), cleaned and truncated.
    pub summary: Option<String>,
}

/// Scan a detail page for its publication date and a fallback description.
pub fn extract_detail_metadata(html: &str) -> DetailMetadata {
    let document = Html::parse_document(html);
    DetailMetadata {
        published_at: extract_published_at(&document),
        summary: extract_summary(&document),
    }
}

/// First parseable date from meta tags, then `<time datetime>`, then JSON-LD.
///
/// A present but unparseable value is skipped and the scan goes on.
pub fn extract_published_at(document: &Html) -> Option<DateTime<Utc>> {
    for selector in DATE_META_SELECTORS {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        let parsed = document
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .and_then(parse_datetime);
        if parsed.is_some() {
            return parsed;
        }
    }

    if let Ok(sel) = Selector::parse("time[datetime]") {
        let parsed = document
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .and_then(parse_datetime);
        if parsed.is_some() {
            return parsed;
        }
    }

    extract_jsonld_date(document)
}

/// First non-empty paragraph, else the meta or OpenGraph description.
pub fn extract_summary(document: &Html) -> Option<String> {
    if let Ok(sel) = Selector::parse("p") {
        let paragraph = document
            .select(&sel)
            .map(|el| element_text(&el))
            .find(|text| !text.is_empty());
        if let Some(text) = paragraph {
            return Some(truncate_chars(&text, MAX_DESCRIPTION_CHARS));
        }
    }

    for selector in [
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
    ] {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        let content = document
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(clean_text)
            .filter(|text| !text.is_empty());
        if let Some(text) = content {
            return Some(truncate_chars(&text, MAX_DESCRIPTION_CHARS));
        }
    }

    None
}

/// Cleaned visible text of an element, with text nodes joined by spaces.
pub fn element_text(el: &ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" "))
}

/// Keep at most `max` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

// ── JSON-LD extraction ──────────────────────────────────────────────────────

fn extract_jsonld_date(document: &Html) -> Option<DateTime<Utc>> {
    let sel = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    let mut objects = Vec::new();
    for element in document.select(&sel) {
        let text = element.inner_html();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if let Ok(value) = serde_json::from_str::<Value>(text) {
            collect_jsonld_objects(value, &mut objects);
        }
    }

    ["datePublished", "dateModified"].iter().find_map(|key| {
        objects
            .iter()
            .filter_map(|obj| obj.get(*key).and_then(|d| d.as_str()))
            .find_map(parse_datetime)
    })
}

fn collect_jsonld_objects(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_jsonld_objects(item, out);
            }
        }
        Value::Object(mut map) => {
            // Handle @graph arrays
            if let Some(graph) = map.remove("@graph") {
                collect_jsonld_objects(graph, out);
            }
            out.push(Value::Object(map));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_meta_published_time() {
        let html = r#"
        <html><head>
        <meta property="article:published_time" content="2025-09-10T12:34:56Z">
        <meta name="date" content="2020-01-01">
        </head><body><p>Body</p></body></html>
        "#;
        let meta = extract_detail_metadata(html);
        assert_eq!(
            meta.published_at,
            Some(Utc.with_ymd_and_hms(2025, 9, 10, 12, 34, 56).unwrap())
        );
    }

    #[test]
    fn test_unparseable_meta_falls_through() {
        let html = r#"
        <html><head>
        <meta property="article:published_time" content="sometime last spring">
        <meta name="pubdate" content="Tue, 04 Mar 2025 09:00:00 GMT">
        </head><body></body></html>
        "#;
        let meta = extract_detail_metadata(html);
        assert_eq!(
            meta.published_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_time_element() {
        let html = r#"
        <html><body>
        <time>no attribute</time>
        <time datetime="2024-07-01">July 1</time>
        </body></html>
        "#;
        let meta = extract_detail_metadata(html);
        assert_eq!(
            meta.published_at,
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_jsonld_graph_date() {
        let html = r#"
        <html><head>
        <script type="application/ld+json">{not valid json}</script>
        <script type="application/ld+json">
        {
          "@context": "https://schema.org",
          "@graph": [
            {"@type": "WebSite", "name": "Example"},
            {"@type": "ScholarlyArticle", "dateModified": "2024-02-02", "datePublished": "2024-01-15T10:00:00+00:00"}
          ]
        }
        </script>
        </head><body></body></html>
        "#;
        let meta = extract_detail_metadata(html);
        assert_eq!(
            meta.published_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_no_date_signal() {
        let meta = extract_detail_metadata("<html><body><p>Nothing</p></body></html>");
        assert_eq!(meta.published_at, None);
        assert_eq!(meta.summary.as_deref(), Some("Nothing"));
    }

    #[test]
    fn test_summary_skips_empty_paragraphs_and_cleans() {
        let html = r#"
        <html><body>
        <p>   </p>
        <p>We study <b>attention</b>
           heads &amp; circuits.</p>
        <p>Second paragraph.</p>
        </body></html>
        "#;
        let meta = extract_detail_metadata(html);
        assert_eq!(
            meta.summary.as_deref(),
            Some("We study attention heads & circuits.")
        );
    }

    #[test]
    fn test_summary_truncated() {
        let long = "word ".repeat(400);
        let html = format!("<html><body><p>{long}</p></body></html>");
        let summary = extract_detail_metadata(&html).summary.unwrap();
        assert!(summary.chars().count() <= MAX_DESCRIPTION_CHARS);
        assert!(summary.starts_with("word word"));
    }

    #[test]
    fn test_summary_falls_back_to_meta_description() {
        let html = r#"
        <html><head>
        <meta property="og:description" content="An OpenGraph summary">
        </head><body><div>no paragraphs</div></body></html>
        "#;
        let meta = extract_detail_metadata(html);
        assert_eq!(meta.summary.as_deref(), Some("An OpenGraph summary"));
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("ab cd", 3), "ab");
    }
}
