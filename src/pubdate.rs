//! Publish-timestamp normalization.
//!
//! The search service emits timestamps in one of two textual formats: an
//! RFC 2822 form with a named weekday and explicit offset
//! (`Tue, 17 Feb 2026 14:30:00 +0900`) or an RFC 3339 / ISO-8601 form.
//! Candidate parsers are tried in order; the first success is converted to
//! UTC so cross-comparison is well-defined.
//!
//! Anything that parses with neither format yields `None`. Callers treat
//! `None` as "exclude this article from recency consideration", never as
//! "assume now" or "assume epoch".

use chrono::{DateTime, FixedOffset, Utc};

type Candidate = fn(&str) -> Option<DateTime<FixedOffset>>;

const CANDIDATES: &[Candidate] = &[parse_rfc2822, parse_rfc3339];

fn parse_rfc2822(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw).ok()
}

fn parse_rfc3339(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

/// Parse a source-provided timestamp string into a UTC instant.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    CANDIDATES
        .iter()
        .find_map(|parse| parse(trimmed))
        .map(|parsed| parsed.with_timezone(&Utc))
}
