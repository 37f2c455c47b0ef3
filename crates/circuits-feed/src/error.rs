// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the feed pipeline.

/// All errors the pipeline can surface.
///
/// Only failures on the listing page reach the caller of
/// [`FeedBuilder::run`](crate::FeedBuilder::run). Per-item failures are
/// absorbed at the item boundary and `EncodingRepair` never leaves the
/// encoding module.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Encoding repair failed: {0}")]
    EncodingRepair(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FeedError {
    pub(crate) fn network(url: &str, err: impl std::fmt::Display) -> Self {
        FeedError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
