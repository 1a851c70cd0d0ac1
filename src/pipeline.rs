//! Run orchestration: collect → recency filter → dedupe → sort.

use tracing::{debug, info, instrument};

use crate::aggregate::Aggregator;
use crate::api::{FetchError, FetchPage};
use crate::dedupe::dedupe;
use crate::filter::filter_recent;
use crate::models::{RecencyCriterion, RunResult, SearchWindow};

/// Execute one complete run.
///
/// Sorting by descending publish time (ties broken by arrival rank) is
/// applied only at this final stage so the earlier stages stay
/// order-preserving and easy to reason about independently. Zero surviving
/// articles is a successful outcome; whether to suppress the notification
/// is the caller's decision.
#[instrument(level = "info", skip_all)]
pub async fn run<F>(
    aggregator: &Aggregator<F>,
    window: &SearchWindow,
    criterion: &RecencyCriterion,
) -> Result<RunResult, FetchError>
where
    F: FetchPage,
{
    let fetched = aggregator.collect(window).await?;
    let fetched_count = fetched.len();

    let recent = filter_recent(fetched, criterion);
    debug!(recent = recent.len(), "applied recency filter");

    let mut kept = dedupe(recent);
    kept.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then(a.source_rank.cmp(&b.source_rank))
    });

    let kept_count = kept.len();
    info!(fetched_count, kept_count, "pipeline run finished");
    Ok(RunResult {
        articles: kept,
        fetched_count,
        kept_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RawNewsItem, SearchPage};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration as StdDuration;

    struct ScriptedFetcher {
        pages: Mutex<VecDeque<Result<SearchPage, FetchError>>>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Result<SearchPage, FetchError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().collect()),
            }
        }
    }

    impl FetchPage for ScriptedFetcher {
        async fn fetch_page(
            &self,
            _keyword: &str,
            _start: u32,
            _display: u32,
        ) -> Result<SearchPage, FetchError> {
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetcher called more times than scripted")
        }
    }

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0).unwrap()
    }

    fn raw(title: &str, link: &str, published_at: DateTime<Utc>) -> RawNewsItem {
        RawNewsItem {
            title: title.to_string(),
            original_link: String::new(),
            link: link.to_string(),
            description: String::new(),
            pub_date: published_at.to_rfc2822(),
        }
    }

    fn criterion() -> RecencyCriterion {
        RecencyCriterion {
            reference_instant: reference(),
            lookback_hours: 2,
        }
    }

    fn aggregator(pages: Vec<Result<SearchPage, FetchError>>) -> Aggregator<ScriptedFetcher> {
        Aggregator::new(ScriptedFetcher::new(pages))
            .with_retry_delay(StdDuration::from_millis(1))
    }

    #[tokio::test]
    async fn test_full_run_filters_dedupes_and_sorts() {
        let items = vec![
            raw("older story", "https://e.com/1", reference() - Duration::minutes(90)),
            raw("stale story", "https://e.com/2", reference() - Duration::hours(5)),
            raw("fresh story", "https://e.com/3", reference() - Duration::minutes(10)),
            // Same link as the first record, tracking suffix aside.
            raw(
                "older story again",
                "https://e.com/1?utm_source=feed",
                reference() - Duration::minutes(85),
            ),
        ];
        let agg = aggregator(vec![Ok(SearchPage {
            items,
            total_available: 4,
        })]);
        let window = SearchWindow::new("kw", 100, 3);

        let result = run(&agg, &window, &criterion()).await.unwrap();

        assert_eq!(result.fetched_count, 4);
        assert_eq!(result.kept_count, 2);
        let titles: Vec<&str> = result.articles.iter().map(|a| a.title.as_str()).collect();
        // Newest first.
        assert_eq!(titles, vec!["fresh story", "older story"]);
    }

    #[tokio::test]
    async fn test_sort_ties_break_by_arrival_rank() {
        let instant = reference() - Duration::minutes(30);
        let items = vec![
            raw("first arrival", "https://e.com/1", instant),
            raw("second arrival", "https://e.com/2", instant),
        ];
        let agg = aggregator(vec![Ok(SearchPage {
            items,
            total_available: 2,
        })]);
        let window = SearchWindow::new("kw", 100, 3);

        let result = run(&agg, &window, &criterion()).await.unwrap();
        assert_eq!(result.articles[0].title, "first arrival");
        assert_eq!(result.articles[1].title, "second arrival");
    }

    #[tokio::test]
    async fn test_mid_run_transport_failure_aborts_instead_of_truncating() {
        let full_page: Vec<RawNewsItem> = (0..3)
            .map(|i| {
                raw(
                    &format!("story {i}"),
                    &format!("https://e.com/{i}"),
                    reference() - Duration::minutes(10),
                )
            })
            .collect();
        let agg = aggregator(vec![
            Ok(SearchPage {
                items: full_page,
                total_available: 9,
            }),
            Err(FetchError::Transport("timeout".to_string())),
        ]);
        let window = SearchWindow::new("kw", 3, 3);

        let result = run(&agg, &window, &criterion()).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_zero_survivors_is_a_successful_empty_result() {
        let items = vec![raw(
            "stale story",
            "https://e.com/1",
            reference() - Duration::hours(6),
        )];
        let agg = aggregator(vec![Ok(SearchPage {
            items,
            total_available: 1,
        })]);
        let window = SearchWindow::new("kw", 100, 3);

        let result = run(&agg, &window, &criterion()).await.unwrap();
        assert_eq!(result.fetched_count, 1);
        assert_eq!(result.kept_count, 0);
        assert!(result.articles.is_empty());
    }
}
