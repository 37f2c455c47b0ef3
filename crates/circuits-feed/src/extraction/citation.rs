// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Major-work entries: `<a class="paper">` whose text is a single
//! "Title Author et al., YEAR Description" blob. Splitting happens later.

use super::card::raw_text;
use super::{resolve_href, CandidateStrategy};
use crate::types::{RawCandidate, StrategyKind};
use scraper::{Html, Selector};
use url::Url;

pub struct CitationStrategy;

impl CandidateStrategy for CitationStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PaperCitationPattern
    }

    fn extract(&self, document: &Html, origin: &Url) -> Vec<RawCandidate> {
        let Ok(sel) = Selector::parse("a.paper[href]") else {
            return Vec::new();
        };

        document
            .select(&sel)
            .filter_map(|a| {
                let url = resolve_href(origin, a.value().attr("href")?)?;
                Some(RawCandidate {
                    url,
                    raw_title: raw_text(&a),
                    raw_description: String::new(),
                    origin_strategy: StrategyKind::PaperCitationPattern,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_blob_captured_whole() {
        let html = r#"
            <a class="paper" href="/2024/heads/">
              <h3>Attention Heads</h3>
              <div class="byline">Smith et al., 2024</div>
              <div>A study of attention patterns in transformers.</div>
            </a>"#;
        let origin = Url::parse("https://example.com/").unwrap();
        let found = CitationStrategy.extract(&Html::parse_document(html), &origin);
        assert_eq!(found.len(), 1);
        assert!(found[0].raw_title.contains("Attention Heads"));
        assert!(found[0].raw_title.contains("Smith et al., 2024"));
        assert!(found[0].raw_description.is_empty());
    }
}
