//! Data models for scraped headlines and the daily digest.
//!
//! - [`NewsItem`]: one normalized headline link from a source
//! - [`NewsDigest`]: the deduplicated, bounded bundle written once per run
//!
//! Field names match the JSON consumed by the site build, so both types
//! serialize without renaming.

use serde::{Deserialize, Serialize};

/// A single headline link as extracted from a news portal.
///
/// The `title` field is the identity used for deduplication. It is compared
/// exactly, so two titles differing only in case or inner whitespace are
/// treated as different items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// Trimmed visible text of the link, always longer than five characters.
    pub title: String,
    /// Fixed label of the originating portal (e.g. `新浪新闻`).
    pub source: String,
    /// Fixed category label (e.g. `热点`).
    pub category: String,
    /// Link target. Falls back to the source homepage when the element has no `href`.
    pub url: String,
}

/// The output of one run: a date stamp plus at most
/// [`MAX_DIGEST_ITEMS`](crate::digest::MAX_DIGEST_ITEMS) unique headlines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsDigest {
    /// Local generation date in `YYYY-MM-DD` format.
    pub date: String,
    /// Deduplicated headlines in source order.
    pub news: Vec<NewsItem>,
}
