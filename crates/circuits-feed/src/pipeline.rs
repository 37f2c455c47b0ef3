// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Pipeline orchestration.
//!
//! The listing page is the only hard dependency: if it cannot be fetched or
//! read, the run fails. Every detail-page problem is contained at the item
//! boundary and the item carries on with what it already has.

use crate::acquisition::http_client::{HttpFetcher, PageSource};
use crate::acquisition::structured::{extract_detail_metadata, DetailMetadata};
use crate::config::FeedConfig;
use crate::dates::resolve_published_at;
use crate::error::{FeedError, Result};
use crate::extraction::{extract_candidates, split_candidate};
use crate::filter::filter_candidates;
use crate::types::{FeedItem, RunReport, SplitCandidate};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Surviving candidates after the listing-page stages.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub candidates: Vec<SplitCandidate>,
    pub report: RunReport,
}

/// Output of a full run: items newest first, plus counters.
#[derive(Debug, Clone)]
pub struct FeedRun {
    pub items: Vec<FeedItem>,
    pub report: RunReport,
}

/// Drives one run against a [`PageSource`].
pub struct FeedBuilder<S: PageSource> {
    config: FeedConfig,
    source: S,
}

impl FeedBuilder<HttpFetcher> {
    /// Builder backed by a real HTTP client.
    pub fn with_http(config: FeedConfig) -> Result<Self> {
        let source = HttpFetcher::new(&config)?;
        Ok(Self::new(config, source))
    }
}

impl<S: PageSource> FeedBuilder<S> {
    pub fn new(config: FeedConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch the listing page and run extraction, splitting, filtering,
    /// deduplication and the cap. Issues exactly one request.
    pub async fn discover(&self) -> Result<Discovery> {
        let origin = self.config.origin();
        let page = self.source.fetch(origin).await?;
        let html = page.text();
        if html.trim().is_empty() {
            return Err(FeedError::Parse(format!("listing page {origin} is empty")));
        }

        let raw = extract_candidates(&html, origin);
        let mut report = RunReport::default();
        for candidate in &raw {
            report.count_candidate(candidate.origin_strategy);
        }

        let split: Vec<SplitCandidate> = raw.into_iter().map(split_candidate).collect();
        let outcome = filter_candidates(
            split,
            self.config.origin_authority(),
            self.config.max_items(),
        );
        report.dropped_cross_origin = outcome.cross_origin;
        report.dropped_duplicates = outcome.duplicates;
        report.dropped_by_cap = outcome.capped;

        info!(
            "discovered {} items on {origin} ({} card, {} year-link, {} citation; \
             dropped {} cross-origin, {} duplicate, {} over cap)",
            outcome.kept.len(),
            report.card_candidates,
            report.year_link_candidates,
            report.citation_candidates,
            report.dropped_cross_origin,
            report.dropped_duplicates,
            report.dropped_by_cap,
        );

        Ok(Discovery {
            candidates: outcome.kept,
            report,
        })
    }

    /// Run the whole pipeline and return items sorted newest first.
    pub async fn run(&self) -> Result<FeedRun> {
        let run_started = Utc::now();
        let Discovery {
            candidates,
            mut report,
        } = self.discover().await?;

        let mut items = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let item = self.enrich(candidate, run_started, &mut report).await;
            report.count_date(item.date_source);
            items.push(item);
        }

        sort_newest_first(&mut items);
        info!(
            "built {} feed items ({} structured dates, {} Last-Modified, {} run-time; \
             {} detail failures)",
            items.len(),
            report.structured_dates,
            report.last_modified_dates,
            report.run_time_dates,
            report.detail_failures,
        );

        Ok(FeedRun { items, report })
    }

    /// Best-effort enrichment of one candidate. Never fails.
    async fn enrich(
        &self,
        candidate: SplitCandidate,
        now: DateTime<Utc>,
        report: &mut RunReport,
    ) -> FeedItem {
        let detail: Option<DetailMetadata> = match self.source.fetch(&candidate.url).await {
            Ok(page) => {
                if page.final_url != page.url {
                    debug!(
                        "{} redirected to {} (status {})",
                        page.url, page.final_url, page.status
                    );
                }
                Some(extract_detail_metadata(&page.text()))
            }
            Err(e) => {
                warn!("detail page unavailable, keeping listing data: {e}");
                report.detail_failures += 1;
                None
            }
        };

        let delay = self.config.request_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let structured = detail.as_ref().and_then(|d| d.published_at);
        let last_modified = match structured {
            Some(_) => None,
            None => self.source.fetch_last_modified(&candidate.url).await,
        };
        let (published_at, date_source) = resolve_published_at(structured, last_modified, now);
        debug!("{}: published {published_at} ({date_source:?})", candidate.url);

        let description = if candidate.description.is_empty() {
            detail.and_then(|d| d.summary).unwrap_or_default()
        } else {
            candidate.description
        };

        FeedItem {
            url: candidate.url,
            title: candidate.title,
            description,
            published_at,
            source_strategy: candidate.strategy,
            date_source,
        }
    }
}

/// Stable sort by publication instant, newest first.
pub fn sort_newest_first(items: &mut [FeedItem]) {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
