// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Core data types flowing through the pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// Which extraction strategy discovered a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Self-contained "note" cards with a heading and a description block.
    CardPattern,
    /// Plain links whose path starts with a four-digit year.
    YearLinkPattern,
    /// Major-work links whose text is one "Title Author et al., YEAR ..." blob.
    PaperCitationPattern,
}

impl StrategyKind {
    /// Whether the strategy yields a single text blob that still needs splitting.
    pub fn yields_blob(self) -> bool {
        matches!(self, StrategyKind::PaperCitationPattern)
    }
}

/// Which step of the date fallback chain produced `published_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// A metadata tag, `time` element or JSON-LD date on the detail page.
    Structured,
    /// The `Last-Modified` header of a HEAD request.
    LastModified,
    /// The instant the run started.
    RunTime,
}

/// A raw (url, title, description) tuple found on the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub url: Url,
    pub raw_title: String,
    pub raw_description: String,
    pub origin_strategy: StrategyKind,
}

/// A candidate after title/description splitting and text cleanup.
///
/// `title` is never empty: it falls back to the URL string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitCandidate {
    pub url: Url,
    pub title: String,
    pub description: String,
    pub strategy: StrategyKind,
}

/// The pipeline's output unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub url: Url,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub source_strategy: StrategyKind,
    pub date_source: DateSource,
}

/// Counters collected over one run. Purely informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub card_candidates: usize,
    pub year_link_candidates: usize,
    pub citation_candidates: usize,
    pub dropped_cross_origin: usize,
    pub dropped_duplicates: usize,
    pub dropped_by_cap: usize,
    pub detail_failures: usize,
    pub structured_dates: usize,
    pub last_modified_dates: usize,
    pub run_time_dates: usize,
}

impl RunReport {
    pub(crate) fn count_candidate(&mut self, kind: StrategyKind) {
        match kind {
            StrategyKind::CardPattern => self.card_candidates += 1,
            StrategyKind::YearLinkPattern => self.year_link_candidates += 1,
            StrategyKind::PaperCitationPattern => self.citation_candidates += 1,
        }
    }

    pub(crate) fn count_date(&mut self, source: DateSource) {
        match source {
            DateSource::Structured => self.structured_dates += 1,
            DateSource::LastModified => self.last_modified_dates += 1,
            DateSource::RunTime => self.run_time_dates += 1,
        }
    }
}
