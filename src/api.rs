//! Client for the external news search API.
//!
//! [`SearchClient`] issues exactly one outbound request per
//! [`FetchPage::fetch_page`] call and never retries internally; retry policy
//! for rate limiting lives in the aggregator so pagination-level failure
//! semantics stay in one place.
//!
//! Throttling (HTTP 429) is surfaced as its own [`FetchError::RateLimited`]
//! variant, carrying the `Retry-After` hint when the service provides one,
//! so the caller can back off for one bounded retry.

use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Failure modes of a single page fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: connect, timeout, or an unreadable body.
    /// Run-aborting.
    #[error("search request failed: {0}")]
    Transport(String),
    /// The service signalled throttling. Retried once per page by the
    /// aggregator before aborting the run.
    #[error("search API rate limited")]
    RateLimited { retry_after: Option<Duration> },
    /// Any other non-success status from the service. Run-aborting.
    #[error("search API returned status {status}")]
    Api { status: u16 },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

/// One raw record as returned by the search API.
///
/// Every field defaults so a sparse record never aborts decoding; empty
/// strings are handled downstream (an empty `pubDate` normalizes to `None`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawNewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "originallink")]
    pub original_link: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total: u32,
    #[serde(default)]
    items: Vec<RawNewsItem>,
}

/// One page of search results plus the service's total-result count.
#[derive(Debug)]
pub struct SearchPage {
    pub items: Vec<RawNewsItem>,
    pub total_available: u32,
}

/// One page fetch against the search service.
///
/// The aggregator is generic over this trait so tests can script page
/// sequences without a network.
pub trait FetchPage {
    async fn fetch_page(
        &self,
        keyword: &str,
        start: u32,
        display: u32,
    ) -> Result<SearchPage, FetchError>;
}

/// Production [`FetchPage`] implementation over HTTP.
///
/// Credentials are opaque to the pipeline: they are injected here at
/// construction and attached to every request as headers.
pub struct SearchClient {
    http: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl SearchClient {
    pub fn new(
        base_url: &str,
        client_id: &str,
        client_secret: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }
}

impl FetchPage for SearchClient {
    #[instrument(level = "debug", skip(self, display))]
    async fn fetch_page(
        &self,
        keyword: &str,
        start: u32,
        display: u32,
    ) -> Result<SearchPage, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[
                ("query", keyword.to_string()),
                ("display", display.to_string()),
                ("start", start.to_string()),
                ("sort", "date".to_string()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            warn!(start, ?retry_after, "search API rate limited");
            return Err(FetchError::RateLimited { retry_after });
        }

        let status = response.status();
        if !status.is_success() {
            warn!(start, status = status.as_u16(), "search API request rejected");
            return Err(FetchError::Api {
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!(
            start,
            returned = body.items.len(),
            total = body.total,
            "fetched search page"
        );
        Ok(SearchPage {
            items: body.items,
            total_available: body.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "lastBuildDate": "Tue, 17 Feb 2026 14:35:12 +0900",
            "total": 1234,
            "start": 1,
            "display": 2,
            "items": [
                {
                    "title": "Bank <b>expands</b> branch network",
                    "originallink": "https://paper.example.com/articles/77",
                    "link": "https://news.example.com/read/77",
                    "description": "The bank said...",
                    "pubDate": "Tue, 17 Feb 2026 14:30:00 +0900"
                },
                {
                    "title": "Second story",
                    "link": "https://news.example.com/read/78"
                }
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total, 1234);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].pub_date, "Tue, 17 Feb 2026 14:30:00 +0900");
        // Sparse record: missing fields default to empty.
        assert_eq!(response.items[1].original_link, "");
        assert_eq!(response.items[1].pub_date, "");
    }

    #[test]
    fn test_search_response_tolerates_missing_items() {
        let response: SearchResponse = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert_eq!(response.total, 0);
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Api { status: 500 };
        assert_eq!(err.to_string(), "search API returned status 500");

        let err = FetchError::RateLimited {
            retry_after: Some(Duration::from_secs(3)),
        };
        assert_eq!(err.to_string(), "search API rate limited");
    }
}
