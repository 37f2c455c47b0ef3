// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Same-origin filtering, first-seen deduplication and the item cap.

use crate::types::SplitCandidate;
use std::collections::HashSet;
use url::Url;

/// Result of filtering, with counts of what was dropped at each step.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<SplitCandidate>,
    pub cross_origin: usize,
    pub duplicates: usize,
    pub capped: usize,
}

/// A URL passes when it has no authority or the origin's exact authority.
pub fn is_same_origin(url: &Url, origin_authority: &str) -> bool {
    let authority = url.authority();
    authority.is_empty() || authority == origin_authority
}

/// Drop cross-origin candidates, then duplicate URLs (first occurrence
/// wins), then truncate to `max_items`. Order is preserved throughout.
pub fn filter_candidates(
    candidates: Vec<SplitCandidate>,
    origin_authority: &str,
    max_items: Option<usize>,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for candidate in candidates {
        if !is_same_origin(&candidate.url, origin_authority) {
            tracing::debug!("dropping cross-origin {}", candidate.url);
            outcome.cross_origin += 1;
            continue;
        }
        if !seen.insert(candidate.url.to_string()) {
            outcome.duplicates += 1;
            continue;
        }
        outcome.kept.push(candidate);
    }

    if let Some(max) = max_items {
        if outcome.kept.len() > max {
            outcome.capped = outcome.kept.len() - max;
            outcome.kept.truncate(max);
        }
    }

    outcome
}
