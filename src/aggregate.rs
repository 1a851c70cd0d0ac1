//! Multi-page aggregation over the search API.
//!
//! Pages are fetched sequentially: the upstream rate limit and offset-based
//! pagination make concurrent page fetches unnecessary, and sequential
//! fetching keeps truncation detection simple. Three independent predicates
//! decide when to stop:
//!
//! - [`reached_page_ceiling`]: the per-run page budget is spent
//! - [`short_page`]: a page came back smaller than requested
//! - [`results_exhausted`]: the next offset is past the service's total
//!
//! A rate-limit signal gets one bounded backoff-and-retry for that page.
//! Any other failure aborts the run and discards pages already fetched; a
//! silently-truncated result set would read as "no new articles" downstream.

use std::time::Duration;

use rand::{Rng, rng};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::api::{FetchError, FetchPage, SearchPage};
use crate::models::{Article, SearchWindow};

/// Walks the search API page by page and assembles the raw candidate set.
pub struct Aggregator<F> {
    fetcher: F,
    retry_delay: Duration,
}

impl<F> Aggregator<F>
where
    F: FetchPage,
{
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Override the base delay used before the single rate-limit retry.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Collect raw, unfiltered, un-deduplicated articles across pages.
    ///
    /// `source_rank` is `page_index * page_size + position_in_page`, so
    /// arrival order is reconstructible and deterministic across pages.
    #[instrument(level = "info", skip_all, fields(keyword = %window.keyword))]
    pub async fn collect(&self, window: &SearchWindow) -> Result<Vec<Article>, FetchError> {
        let mut articles = Vec::new();
        let mut start = window.display_offset;
        let mut pages_fetched: u32 = 0;

        loop {
            let page = self
                .fetch_page_once_retried(&window.keyword, start, window.page_size)
                .await?;
            let total_available = page.total_available;
            let item_count = page.items.len();

            for (position, raw) in page.items.into_iter().enumerate() {
                let rank = pages_fetched * window.page_size + position as u32;
                articles.push(Article::from_raw(raw, rank));
            }
            pages_fetched += 1;
            debug!(
                page = pages_fetched,
                start, item_count, total_available, "aggregated search page"
            );

            if reached_page_ceiling(pages_fetched, window.max_pages)
                || short_page(item_count, window.page_size)
                || results_exhausted(start + window.page_size, total_available)
            {
                break;
            }
            start += window.page_size;
        }

        info!(
            pages = pages_fetched,
            count = articles.len(),
            "collected candidate articles"
        );
        Ok(articles)
    }

    /// Fetch one page, absorbing at most one rate-limit signal with a
    /// bounded backoff. Every other failure propagates, so a partially
    /// fetched run is never passed off as complete.
    async fn fetch_page_once_retried(
        &self,
        keyword: &str,
        start: u32,
        display: u32,
    ) -> Result<SearchPage, FetchError> {
        match self.fetcher.fetch_page(keyword, start, display).await {
            Err(FetchError::RateLimited { retry_after }) => {
                let jitter = Duration::from_millis(rng().random_range(0..=250));
                let delay = retry_after.unwrap_or(self.retry_delay) + jitter;
                warn!(start, ?delay, "rate limited; backing off to retry page once");
                sleep(delay).await;
                self.fetcher.fetch_page(keyword, start, display).await
            }
            other => other,
        }
    }
}

/// The per-run page budget is spent.
fn reached_page_ceiling(pages_fetched: u32, max_pages: u32) -> bool {
    pages_fetched >= max_pages
}

/// A page smaller than requested signals the end of the available results.
fn short_page(item_count: usize, page_size: u32) -> bool {
    (item_count as u32) < page_size
}

/// The next offset would start past everything the service says it has.
fn results_exhausted(next_start: u32, total_available: u32) -> bool {
    next_start > total_available
}
