//! Digest assembly.
//!
//! One run visits every configured source in order, one at a time:
//!
//! 1. **Fetch** the homepage through a [`FetchPage`] implementation
//! 2. **Extract** headline items with the source's selection rule
//! 3. **Merge** all items, dropping repeated titles (first seen wins)
//! 4. **Truncate** to [`MAX_DIGEST_ITEMS`] and stamp today's date
//!
//! A failing source is logged and contributes nothing; the digest is always
//! produced, possibly with an empty `news` list.

use crate::fetcher::{FetchError, FetchPage};
use crate::models::{NewsDigest, NewsItem};
use crate::scrapers::{self, ExtractError};
use crate::sources::SourceConfig;
use crate::utils::{today, truncate_for_log};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use tracing::{debug, error, info, instrument, warn};

/// Upper bound on items in a digest.
pub const MAX_DIGEST_ITEMS: usize = 15;

/// What a single source produced during a run.
#[derive(Debug)]
pub enum SourceOutcome {
    Collected(Vec<NewsItem>),
    /// The page could not be fetched; extraction was not attempted.
    FetchFailed(FetchError),
    ExtractFailed(ExtractError),
}

impl SourceOutcome {
    /// Items contributed to the digest; empty for either failure.
    pub fn items(&self) -> &[NewsItem] {
        match self {
            SourceOutcome::Collected(items) => items,
            SourceOutcome::FetchFailed(_) | SourceOutcome::ExtractFailed(_) => &[],
        }
    }

    /// Reason the source contributed nothing, if it failed.
    pub fn failure(&self) -> Option<String> {
        match self {
            SourceOutcome::Collected(_) => None,
            SourceOutcome::FetchFailed(e) => Some(format!("fetch: {e}")),
            SourceOutcome::ExtractFailed(e) => Some(format!("extract: {e}")),
        }
    }

    pub fn into_items(self) -> Vec<NewsItem> {
        match self {
            SourceOutcome::Collected(items) => items,
            SourceOutcome::FetchFailed(_) | SourceOutcome::ExtractFailed(_) => Vec::new(),
        }
    }
}

/// Fetch and extract a single source, absorbing any failure into the outcome.
#[instrument(level = "info", skip_all, fields(source = %source.name, url = %source.url))]
pub async fn collect_source<F: FetchPage>(fetcher: &F, source: &SourceConfig) -> SourceOutcome {
    info!(label = %source.label, "Fetching news");

    let markup = match fetcher.fetch_page(&source.url).await {
        Ok(markup) => markup,
        Err(e) => {
            error!(error = %e, "Fetch failed; source contributes no items");
            return SourceOutcome::FetchFailed(e);
        }
    };

    match scrapers::extract(&markup, source) {
        Ok(items) => {
            if items.is_empty() {
                warn!(preview = %truncate_for_log(&markup, 200), "No headlines extracted");
            } else {
                info!(count = items.len(), "Collected headlines");
            }
            SourceOutcome::Collected(items)
        }
        Err(e) => {
            error!(error = %e, "Extraction failed; source contributes no items");
            SourceOutcome::ExtractFailed(e)
        }
    }
}

/// Collect every source sequentially, preserving configured order.
pub async fn collect_all<F: FetchPage>(fetcher: &F, sources: &[SourceConfig]) -> Vec<SourceOutcome> {
    stream::iter(sources)
        .then(|source| collect_source(fetcher, source))
        .collect()
        .await
}

/// Drop items whose title was already seen, keeping the first occurrence.
pub fn dedupe_by_title(items: impl IntoIterator<Item = NewsItem>) -> Vec<NewsItem> {
    items
        .into_iter()
        .unique_by(|item| item.title.clone())
        .collect()
}

/// Merge outcomes into a digest stamped with `date`.
pub fn assemble(outcomes: Vec<SourceOutcome>, date: String) -> NewsDigest {
    let merged: Vec<NewsItem> = outcomes
        .into_iter()
        .flat_map(SourceOutcome::into_items)
        .collect();
    let total = merged.len();

    let mut news = dedupe_by_title(merged);
    let unique = news.len();
    news.truncate(MAX_DIGEST_ITEMS);

    debug!(total, unique, kept = news.len(), "Merged source items");
    NewsDigest { date, news }
}

/// Build today's digest from `sources`.
pub async fn build_digest<F: FetchPage>(fetcher: &F, sources: &[SourceConfig]) -> NewsDigest {
    build_digest_with_clock(fetcher, sources, today).await
}

/// Build a digest stamped by `clock`, which is read before any source is fetched.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn build_digest_with_clock<F, C>(fetcher: &F, sources: &[SourceConfig], clock: C) -> NewsDigest
where
    F: FetchPage,
    C: FnOnce() -> String,
{
    let date = clock();
    let outcomes = collect_all(fetcher, sources).await;

    let mut failed = 0usize;
    for (source, outcome) in sources.iter().zip(&outcomes) {
        if let Some(reason) = outcome.failure() {
            failed += 1;
            warn!(source = %source.name, %reason, "Source contributed no items");
        }
    }
    if failed > 0 {
        warn!(failed, "Some sources contributed no items");
    }
    let collected: usize = outcomes.iter().map(|o| o.items().len()).sum();

    let digest = assemble(outcomes, date);
    info!(date = %digest.date, collected, count = digest.news.len(), "Digest assembled");
    digest
}
