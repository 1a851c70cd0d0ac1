//! Recency filtering.

use tracing::{debug, warn};

use crate::models::{Article, RecencyCriterion};
use crate::utils::truncate_for_log;

/// Retain the articles published inside the criterion's trailing window.
///
/// Pure and order-preserving: the reference instant was captured once at run
/// start, so every article is judged against the same cutoff. Articles whose
/// timestamp failed to normalize are excluded rather than guessed at; a
/// single bad timestamp must not abort an otherwise-good run.
pub fn filter_recent(articles: Vec<Article>, criterion: &RecencyCriterion) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|article| match article.published_at {
            Some(published_at) if criterion.qualifies(published_at) => true,
            Some(published_at) => {
                debug!(
                    title = %truncate_for_log(&article.title, 50),
                    %published_at,
                    "article outside recency window"
                );
                false
            }
            None => {
                warn!(
                    title = %truncate_for_log(&article.title, 50),
                    "unparseable publish date; excluding article"
                );
                false
            }
        })
        .collect()
}
