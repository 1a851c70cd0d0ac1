//! Small text helpers shared across the pipeline.

use scraper::Html;

/// Strip markup from a text snippet, returning its plain-text content.
///
/// The search service wraps matched terms in tags (`<b>…</b>`) and escapes
/// entities in titles and descriptions; parsing the snippet as an HTML
/// fragment handles both in one pass.
pub fn strip_tags(input: &str) -> String {
    if !input.contains('<') && !input.contains('&') {
        return input.to_string();
    }
    let fragment = Html::parse_fragment(input);
    fragment.root_element().text().collect()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_ws(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Cuts at the nearest character boundary at or below `max` bytes and
/// appends the number of bytes dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let cut = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
