// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP page source wrapping reqwest.
//!
//! Not a crawler: one GET per page and one HEAD per item for
//! `Last-Modified`. Redirects are followed, timeouts are bounded, and
//! failures are returned to the caller without retrying.

use crate::acquisition::encoding::{charset_from_content_type, decode_body};
use crate::config::FeedConfig;
use crate::dates::parse_datetime;
use crate::error::{FeedError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, LAST_MODIFIED};
use url::Url;

/// Body and metadata of a successful GET.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Requested URL.
    pub url: Url,
    /// Final URL after redirects.
    pub final_url: Url,
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Charset declared by the `Content-Type` header, which may be wrong.
    pub declared_charset: Option<String>,
}

impl FetchedPage {
    /// Decode the body, trusting UTF-8 over the declared charset.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.declared_charset.as_deref())
    }
}

/// Where pages come from. The pipeline only ever talks to this trait.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET a page. Non-success statuses are errors.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;

    /// HEAD a page and parse its `Last-Modified` header. Never fails:
    /// transport errors and missing or unparseable headers give `None`.
    async fn fetch_last_modified(&self, url: &Url) -> Option<DateTime<Utc>>;
}

/// reqwest-backed [`PageSource`].
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    head_timeout: std::time::Duration,
}

impl HttpFetcher {
    /// Build a client with the configured user agent and timeouts.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| FeedError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            head_timeout: config.head_timeout(),
        })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FeedError::network(url.as_str(), e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = resp.url().clone();
        let declared_charset = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type);

        let body = resp
            .bytes()
            .await
            .map_err(|e| FeedError::network(url.as_str(), e))?
            .to_vec();

        tracing::debug!("fetched {url} ({} bytes, status {status})", body.len());

        Ok(FetchedPage {
            url: url.clone(),
            final_url,
            status: status.as_u16(),
            body,
            declared_charset,
        })
    }

    async fn fetch_last_modified(&self, url: &Url) -> Option<DateTime<Utc>> {
        let resp = match self
            .client
            .head(url.clone())
            .timeout(self.head_timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("HEAD {url} failed: {e}");
                return None;
            }
        };

        resp.headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_creation() {
        let fetcher = HttpFetcher::new(&FeedConfig::default());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_fetched_page_text_uses_declared_charset_as_fallback() {
        let page = FetchedPage {
            url: Url::parse("https://example.com/").unwrap(),
            final_url: Url::parse("https://example.com/").unwrap(),
            status: 200,
            body: vec![0x63, 0x61, 0x66, 0xE9],
            declared_charset: Some("iso-8859-1".to_string()),
        };
        assert_eq!(page.text(), "café");
    }
}
