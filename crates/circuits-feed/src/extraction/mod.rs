// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Candidate discovery on the listing page.
//!
//! Each strategy recognizes one structural pattern and knows nothing about
//! the others. [`run_strategies`] applies them in priority order and drops
//! any URL a higher-priority strategy already produced.

pub mod card;
pub mod citation;
pub mod split;
pub mod year_link;

use crate::types::{RawCandidate, StrategyKind};
use scraper::Html;
use std::collections::HashSet;
use url::Url;

pub use card::CardStrategy;
pub use citation::CitationStrategy;
pub use split::{split_blob, split_candidate};
pub use year_link::YearLinkStrategy;

/// One way of recognizing items in listing markup.
pub trait CandidateStrategy {
    fn kind(&self) -> StrategyKind;

    /// Every candidate this strategy sees, in document order.
    fn extract(&self, document: &Html, origin: &Url) -> Vec<RawCandidate>;
}

/// Card, year-link and citation strategies, highest priority first.
pub fn default_strategies() -> Vec<Box<dyn CandidateStrategy>> {
    vec![
        Box::new(CardStrategy),
        Box::new(YearLinkStrategy),
        Box::new(CitationStrategy),
    ]
}

/// Parse the listing page and run the default strategies over it.
pub fn extract_candidates(html: &str, origin: &Url) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);
    run_strategies(&document, origin, &default_strategies())
}

/// Run strategies in order. A URL claimed by an earlier strategy is skipped
/// by later ones; repeats within one strategy are left for deduplication.
pub fn run_strategies(
    document: &Html,
    origin: &Url,
    strategies: &[Box<dyn CandidateStrategy>],
) -> Vec<RawCandidate> {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for strategy in strategies {
        let mut newly_claimed = HashSet::new();
        let mut skipped = 0usize;
        let mut kept = 0usize;
        for candidate in strategy.extract(document, origin) {
            if claimed.contains(candidate.url.as_str()) {
                skipped += 1;
                continue;
            }
            newly_claimed.insert(candidate.url.to_string());
            candidates.push(candidate);
            kept += 1;
        }
        tracing::debug!(
            "{:?}: {kept} candidates, {skipped} already claimed",
            strategy.kind()
        );
        claimed.extend(newly_claimed);
    }

    candidates
}

/// Resolve an `href` against the origin.
///
/// Empty, fragment-only and non-navigable hrefs give `None`, as does
/// anything that does not resolve to http or https.
pub fn resolve_href(origin: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = origin.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

/// Whether an element's `class` attribute lists the given class.
pub(crate) fn has_class(el: &scraper::node::Element, class: &str) -> bool {
    el.classes().any(|c| c == class)
}
