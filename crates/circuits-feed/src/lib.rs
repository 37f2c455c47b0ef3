// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! circuits-feed — turn an unstructured listing page into ordered feed items.
//!
//! The pipeline fetches one listing page, discovers candidate items with a
//! fixed list of extraction strategies, repairs mis-decoded text, drops
//! cross-origin and duplicate links, enriches every survivor from its own
//! detail page, resolves exactly one publication instant per item and sorts
//! the result newest first. Rendering the items into a syndication format is
//! left to the caller.

pub mod acquisition;
pub mod config;
pub mod dates;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod pipeline;
pub mod types;

pub use acquisition::http_client::{FetchedPage, HttpFetcher, PageSource};
pub use config::FeedConfig;
pub use error::{FeedError, Result};
pub use pipeline::{Discovery, FeedBuilder, FeedRun};
pub use types::*;
