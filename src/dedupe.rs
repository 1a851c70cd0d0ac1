//! Duplicate-article removal within a single run.
//!
//! Identity is the canonicalized link; the normalized title is a secondary
//! signal because the same story is sometimes indexed under two link
//! variants. The first occurrence of a key (lowest arrival rank) is always
//! kept; only later occurrences are dropped, so the filter is stable.

use std::collections::HashSet;

use tracing::debug;
use url::Url;

use crate::models::Article;
use crate::utils::{collapse_ws, strip_tags, truncate_for_log};

const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "igshid", "mc_cid", "mc_eid"];

fn is_tracking_param(name: &str) -> bool {
    name.starts_with("utm_") || TRACKING_PARAMS.contains(&name)
}

/// Canonical identity key for a link.
///
/// The URL parser already lowercases scheme and host; on top of that,
/// tracking query parameters and the fragment are removed and a trailing
/// slash is trimmed. Links that do not parse fall back to the trimmed raw
/// string so they still dedupe against byte-identical copies.
pub fn canonical_link(link: &str) -> String {
    let Ok(mut url) = Url::parse(link.trim()) else {
        return link.trim().to_string();
    };
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&kept);
    }
    url.set_fragment(None);
    url.as_str().trim_end_matches('/').to_string()
}

/// Secondary identity key: markup-stripped, whitespace-collapsed, lowercased
/// title.
pub fn normalized_title(title: &str) -> String {
    collapse_ws(&strip_tags(title)).to_lowercase()
}

/// Drop every article whose link key or non-empty title key was already
/// seen. Relative order of kept articles is unchanged.
pub fn dedupe(articles: Vec<Article>) -> Vec<Article> {
    let mut seen_links: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(articles.len());

    for article in articles {
        let link_key = canonical_link(&article.link);
        let title_key = normalized_title(&article.title);

        let duplicate = seen_links.contains(&link_key)
            || (!title_key.is_empty() && seen_titles.contains(&title_key));
        if duplicate {
            debug!(
                title = %truncate_for_log(&article.title, 50),
                rank = article.source_rank,
                "dropping duplicate article"
            );
            continue;
        }

        seen_links.insert(link_key);
        if !title_key.is_empty() {
            seen_titles.insert(title_key);
        }
        kept.push(article);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, link: &str, rank: u32) -> Article {
        Article {
            title: title.to_string(),
            link: link.to_string(),
            summary: String::new(),
            published_at: None,
            source_rank: rank,
        }
    }

    #[test]
    fn test_canonical_link_strips_tracking_params() {
        assert_eq!(
            canonical_link("https://news.example.com/a/1?utm_source=feed&utm_medium=rss"),
            "https://news.example.com/a/1"
        );
        assert_eq!(
            canonical_link("https://news.example.com/a/1?id=7&fbclid=xyz"),
            "https://news.example.com/a/1?id=7"
        );
    }

    #[test]
    fn test_canonical_link_lowercases_scheme_and_host() {
        assert_eq!(
            canonical_link("HTTPS://News.Example.COM/A/1"),
            "https://news.example.com/A/1"
        );
    }

    #[test]
    fn test_canonical_link_drops_fragment_and_trailing_slash() {
        assert_eq!(
            canonical_link("https://news.example.com/a/1/#comments"),
            "https://news.example.com/a/1"
        );
    }

    #[test]
    fn test_canonical_link_unparseable_falls_back_to_raw() {
        assert_eq!(canonical_link("  not a url  "), "not a url");
    }

    #[test]
    fn test_normalized_title() {
        assert_eq!(
            normalized_title("Bank <b>Raises</b>   Rates"),
            "bank raises rates"
        );
    }

    #[test]
    fn test_same_link_different_query_suffix_is_one_article() {
        let kept = dedupe(vec![
            article("first take", "https://e.com/a/1?utm_source=x", 0),
            article("second take", "https://e.com/a/1?utm_source=y", 1),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_rank, 0);
    }

    #[test]
    fn test_same_title_different_link_keeps_lower_rank() {
        let kept = dedupe(vec![
            article("Bank raises rates", "https://e.com/a/1", 0),
            article("bank  raises rates", "https://mirror.e.com/b/2", 1),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].link, "https://e.com/a/1");
    }

    #[test]
    fn test_empty_titles_do_not_dedupe_each_other() {
        let kept = dedupe(vec![
            article("", "https://e.com/a/1", 0),
            article("", "https://e.com/a/2", 1),
        ]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_order_of_kept_articles_is_preserved() {
        let kept = dedupe(vec![
            article("one", "https://e.com/1", 0),
            article("two", "https://e.com/2", 1),
            article("one", "https://e.com/3", 2),
            article("three", "https://e.com/4", 3),
        ]);
        let ranks: Vec<u32> = kept.iter().map(|a| a.source_rank).collect();
        assert_eq!(ranks, vec![0, 1, 3]);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let input = vec![
            article("one", "https://e.com/1", 0),
            article("one", "https://e.com/2", 1),
            article("two", "https://e.com/3", 2),
        ];
        let once = dedupe(input);
        let first_pass: Vec<(String, u32)> =
            once.iter().map(|a| (a.link.clone(), a.source_rank)).collect();
        let twice = dedupe(once);
        let second_pass: Vec<(String, u32)> =
            twice.iter().map(|a| (a.link.clone(), a.source_rank)).collect();
        assert_eq!(first_pass, second_pass);
    }
}
