// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Run configuration.
//!
//! A `FeedConfig` is built once and handed to every component. Nothing in
//! the library reads ambient state.

use crate::error::{FeedError, Result};
use std::time::Duration;
use url::Url;

/// Listing page used when none is configured.
pub const DEFAULT_ORIGIN: &str = "https://transformer-circuits.pub/";
/// Client-agent string sent with every request.
pub const DEFAULT_USER_AGENT: &str = "tc-unofficial-rss/1.1 (+github actions; contact: N/A)";
pub const DEFAULT_MAX_ITEMS: usize = 50;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_HEAD_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_DELAY_MS: u64 = 200;

/// Immutable settings for one run.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    origin: Url,
    max_items: Option<usize>,
    request_timeout: Duration,
    head_timeout: Duration,
    request_delay: Duration,
    user_agent: String,
}

impl FeedConfig {
    /// Create a configuration for the given listing page with default limits.
    pub fn new(origin: &str) -> Result<Self> {
        let origin = Url::parse(origin)
            .map_err(|e| FeedError::InvalidConfig(format!("origin {origin:?}: {e}")))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(FeedError::InvalidConfig(format!(
                "origin must be http or https, got {}",
                origin.scheme()
            )));
        }
        if origin.host_str().is_none() {
            return Err(FeedError::InvalidConfig(
                "origin must have a host".to_string(),
            ));
        }

        Ok(Self {
            origin,
            max_items: Some(DEFAULT_MAX_ITEMS),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            head_timeout: Duration::from_millis(DEFAULT_HEAD_TIMEOUT_MS),
            request_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Cap the number of items, or `None` for no cap.
    pub fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_head_timeout(mut self, timeout: Duration) -> Self {
        self.head_timeout = timeout;
        self
    }

    /// Delay inserted after every detail-page fetch.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// The origin's network authority (`host[:port]`).
    pub fn origin_authority(&self) -> &str {
        self.origin.authority()
    }

    pub fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn head_timeout(&self) -> Duration {
        self.head_timeout
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN).expect("DEFAULT_ORIGIN is a valid http URL")
    }
}
