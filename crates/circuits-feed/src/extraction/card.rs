// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Self-contained note cards: `<a class="note">` with a heading and a
//! description block inside.

use super::{resolve_href, CandidateStrategy};
use crate::types::{RawCandidate, StrategyKind};
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub struct CardStrategy;

impl CandidateStrategy for CardStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CardPattern
    }

    fn extract(&self, document: &Html, origin: &Url) -> Vec<RawCandidate> {
        let (Ok(card_sel), Ok(heading_sel), Ok(desc_sel)) = (
            Selector::parse("a.note[href]"),
            Selector::parse("h1, h2, h3, h4, h5, h6"),
            Selector::parse(r#"[class*="description"]"#),
        ) else {
            return Vec::new();
        };

        document
            .select(&card_sel)
            .filter_map(|card| {
                let url = resolve_href(origin, card.value().attr("href")?)?;
                let raw_title = card
                    .select(&heading_sel)
                    .next()
                    .map(|h| raw_text(&h))
                    .unwrap_or_default();
                let raw_description = card
                    .select(&desc_sel)
                    .next()
                    .map(|d| raw_text(&d))
                    .unwrap_or_default();

                Some(RawCandidate {
                    url,
                    raw_title,
                    raw_description,
                    origin_strategy: StrategyKind::CardPattern,
                })
            })
            .collect()
    }
}

/// Text nodes joined with single spaces, otherwise untouched.
pub(crate) fn raw_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Vec<RawCandidate> {
        let origin = Url::parse("https://example.com/").unwrap();
        CardStrategy.extract(&Html::parse_document(html), &origin)
    }

    #[test]
    fn test_card_with_heading_and_description() {
        let found = run(r#"
            <a class="note" href="/2025/attribution/">
              <h3>Attribution Graphs</h3>
              <div class="card-description">Tracing <em>computation</em>.</div>
            </a>"#);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url.as_str(), "https://example.com/2025/attribution/");
        assert_eq!(found[0].raw_title.trim(), "Attribution Graphs");
        assert!(found[0].raw_description.contains("computation"));
    }

    #[test]
    fn test_card_without_heading_or_description() {
        let found = run(r#"<a class="note" href="/x/"><span>bare</span></a>"#);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_title, "");
        assert_eq!(found[0].raw_description, "");
    }

    #[test]
    fn test_card_with_empty_href_skipped() {
        let found = run(r#"<a class="note" href=""><h3>Nothing</h3></a>
                           <a class="other" href="/y/"><h3>Not a card</h3></a>"#);
        assert!(found.is_empty());
    }
}
