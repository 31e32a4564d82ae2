//! Headline extraction from portal markup.
//!
//! Each [`SelectionRule`] variant has its own submodule:
//!
//! | Rule | Module | Used by |
//! |------|--------|---------|
//! | `HotSection` | [`hot_section`] | Sina News homepage |
//! | `FeedCards` | [`feed_cards`] | Toutiao homepage |
//!
//! # Common Rules
//!
//! - A candidate's title is its visible text, trimmed; it must be longer than
//!   [`MIN_TITLE_CHARS`] characters.
//! - At most [`MAX_ITEMS_PER_SOURCE`] items are returned, in document order.
//! - HTML parsing itself never fails. The only error is a selector string that
//!   does not parse, which can only come from a user-supplied source list.

use crate::models::NewsItem;
use crate::sources::{SelectionRule, SourceConfig};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, instrument};

pub mod feed_cards;
pub mod hot_section;

/// Upper bound on items taken from a single source.
pub const MAX_ITEMS_PER_SOURCE: usize = 10;

/// A title must have strictly more characters than this after trimming.
pub const MIN_TITLE_CHARS: usize = 5;

/// Why a source's markup could not be processed.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Extract headline items from `markup` according to `source.rule`.
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub fn extract(markup: &str, source: &SourceConfig) -> Result<Vec<NewsItem>, ExtractError> {
    let document = Html::parse_document(markup);
    let items = match &source.rule {
        SelectionRule::HotSection { container } => {
            hot_section::extract(&document, source, container)?
        }
        SelectionRule::FeedCards {
            card,
            title,
            origin,
        } => feed_cards::extract(&document, source, card, title, origin)?,
    };
    debug!(count = items.len(), "Extracted headlines");
    Ok(items)
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Trimmed visible text of `element`, if it is long enough to be a headline.
pub(crate) fn headline_text(element: &ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let trimmed = text.trim();
    (trimmed.chars().count() > MIN_TITLE_CHARS).then(|| trimmed.to_string())
}
