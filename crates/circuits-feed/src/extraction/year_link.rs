// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Plain links whose path starts with a four-digit year, e.g. `/2024/foo/`.

use super::card::raw_text;
use super::{has_class, resolve_href, CandidateStrategy};
use crate::types::{RawCandidate, StrategyKind};
use scraper::{Html, Selector};
use url::Url;

/// Classes that mark an anchor as belonging to another strategy.
const TAGGED_CLASSES: [&str; 2] = ["note", "paper"];

pub struct YearLinkStrategy;

impl CandidateStrategy for YearLinkStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::YearLinkPattern
    }

    fn extract(&self, document: &Html, origin: &Url) -> Vec<RawCandidate> {
        let Ok(sel) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&sel)
            .filter(|a| !TAGGED_CLASSES.iter().any(|c| has_class(a.value(), c)))
            .filter_map(|a| {
                let url = resolve_href(origin, a.value().attr("href")?)?;
                if !starts_with_year(&url) {
                    return None;
                }
                Some(RawCandidate {
                    url,
                    raw_title: raw_text(&a),
                    raw_description: String::new(),
                    origin_strategy: StrategyKind::YearLinkPattern,
                })
            })
            .collect()
    }
}

/// Whether the first path segment is exactly four ASCII digits.
pub fn starts_with_year(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next())
        .is_some_and(|seg| seg.len() == 4 && seg.bytes().all(|b| b.is_ascii_digit()))
}
