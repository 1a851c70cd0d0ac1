//! Data models for one search-and-notify run.
//!
//! This module defines the request-scoped value types that flow through the
//! pipeline:
//! - [`Article`]: one search result, normalized for downstream stages
//! - [`SearchWindow`]: pagination parameters for a run
//! - [`RecencyCriterion`]: the trailing time window articles must fall in
//! - [`RunResult`]: the final ordered, deduplicated outcome
//!
//! Everything here is created fresh at run start and discarded at run end;
//! nothing survives across invocations.

use chrono::{DateTime, Duration, Utc};

use crate::api::RawNewsItem;
use crate::pubdate::parse_pub_date;
use crate::utils::{collapse_ws, strip_tags};

/// One search result, normalized from the raw API record.
///
/// `title` and `summary` are stored markup-stripped and
/// whitespace-collapsed so they are ready for display; the deduplicator
/// additionally lowercases its own copies when deriving identity keys.
#[derive(Debug, Clone)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// Canonical URL of the article; the primary identity signal.
    pub link: String,
    /// Short descriptive text from the search result.
    pub summary: String,
    /// Publish instant in UTC, or `None` when the source timestamp did not
    /// parse. Articles with `None` never survive the recency filter.
    pub published_at: Option<DateTime<Utc>>,
    /// Arrival position across pages; used only as a stable tie-break.
    pub source_rank: u32,
}

impl Article {
    /// Convert a raw API record into an [`Article`].
    ///
    /// The publish timestamp is normalized exactly once, here. `source_rank`
    /// is assigned by the aggregator from the record's page and position so
    /// cross-page ordering stays deterministic.
    pub fn from_raw(raw: RawNewsItem, source_rank: u32) -> Self {
        let link = if raw.link.is_empty() {
            raw.original_link
        } else {
            raw.link
        };
        Self {
            title: collapse_ws(&strip_tags(&raw.title)),
            summary: collapse_ws(&strip_tags(&raw.description)),
            published_at: parse_pub_date(&raw.pub_date),
            link,
            source_rank,
        }
    }
}

/// Request-scoped pagination parameters for one run.
#[derive(Debug, Clone)]
pub struct SearchWindow {
    /// The keyword submitted to the search API.
    pub keyword: String,
    /// Results requested per page.
    pub page_size: u32,
    /// Ceiling on pages fetched per run, to bound outbound calls.
    pub max_pages: u32,
    /// First result offset. The external API is 1-based.
    pub display_offset: u32,
}

impl SearchWindow {
    pub fn new(keyword: impl Into<String>, page_size: u32, max_pages: u32) -> Self {
        Self {
            keyword: keyword.into(),
            page_size,
            max_pages,
            display_offset: 1,
        }
    }
}

/// The trailing recency window for one run.
///
/// `reference_instant` is the run's start time, captured once so every
/// article is judged against the same cutoff.
#[derive(Debug, Clone, Copy)]
pub struct RecencyCriterion {
    pub reference_instant: DateTime<Utc>,
    pub lookback_hours: i64,
}

impl RecencyCriterion {
    /// The oldest publish instant that still qualifies.
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.reference_instant - Duration::hours(self.lookback_hours)
    }

    /// Whether a publish instant falls inside the window. Future-dated
    /// instants (clock skew upstream) are excluded, not included.
    pub fn qualifies(&self, published_at: DateTime<Utc>) -> bool {
        published_at >= self.cutoff() && published_at <= self.reference_instant
    }
}

/// The outcome of one complete run.
#[derive(Debug)]
pub struct RunResult {
    /// Final articles, sorted by publish time descending, ties broken by
    /// `source_rank` ascending.
    pub articles: Vec<Article>,
    /// Raw records aggregated across pages, before filtering.
    pub fetched_count: usize,
    /// Articles that survived filtering and deduplication.
    pub kept_count: usize,
}
