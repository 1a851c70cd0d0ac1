//! Light text analysis for the notification body.
//!
//! Two helpers feed the rendered email: a frequency-based keyword ranking
//! across the run's surviving articles (the badge row in the header) and a
//! leading-sentence summarizer for individual articles. Both are plain text
//! heuristics; they carry no state and never fail.

use std::collections::HashMap;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Article;

static SENTENCE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence split pattern"));

/// Minimum length for a sentence to count as content rather than noise.
const MIN_SENTENCE_CHARS: usize = 10;

/// Rank the most frequent tokens across titles and summaries.
///
/// Tokens shorter than two characters and all-digit tokens are skipped.
/// Ties break lexically so the result is deterministic run to run.
pub fn extract_keywords(articles: &[Article], top_n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for article in articles {
        for source in [&article.title, &article.summary] {
            for token in source.split(|c: char| !c.is_alphanumeric()) {
                let token = token.to_lowercase();
                if token.chars().count() < 2 || token.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
                *counts.entry(token).or_default() += 1;
            }
        }
    }

    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(top_n)
        .collect()
}

/// Extract the leading sentences of a text as its summary.
///
/// Lead sentences carry the substance in news copy, so no scoring is done.
/// Falls back to a plain 100-character truncation when no sentence boundary
/// is found.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let sentences: Vec<&str> = SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect();

    if sentences.is_empty() {
        return if text.chars().count() > 100 {
            let cut: String = text.chars().take(100).collect();
            format!("{cut}...")
        } else {
            text.to_string()
        };
    }

    let mut summary = sentences.iter().take(max_sentences).join(". ");
    if !summary.ends_with(['.', '!', '?']) {
        summary.push('.');
    }
    summary
}
