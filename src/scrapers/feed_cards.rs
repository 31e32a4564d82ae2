//! Feed card scraping (Toutiao).
//!
//! The homepage renders stories as repeated cards. Each card holds a title
//! link whose `href` is relative to the site origin.

use super::{ExtractError, MAX_ITEMS_PER_SOURCE, headline_text, parse_selector};
use crate::models::NewsItem;
use crate::sources::SourceConfig;
use scraper::{ElementRef, Html};
use tracing::warn;

pub(super) fn extract(
    document: &Html,
    source: &SourceConfig,
    card: &str,
    title: &str,
    origin: &str,
) -> Result<Vec<NewsItem>, ExtractError> {
    let card_selector = parse_selector(card)?;
    let title_selector = parse_selector(title)?;

    let cards: Vec<ElementRef<'_>> = document
        .select(&card_selector)
        .take(MAX_ITEMS_PER_SOURCE)
        .collect();
    if cards.is_empty() {
        warn!(card, "Could not find news articles");
        return Ok(Vec::new());
    }

    let items = cards
        .into_iter()
        .filter_map(|card| {
            let link = card.select(&title_selector).next()?;
            let title = headline_text(&link)?;
            let href = link.value().attr("href").unwrap_or("/");
            Some(NewsItem {
                title,
                source: source.label.clone(),
                category: source.category.clone(),
                url: format!("{origin}{href}"),
            })
        })
        .collect();

    Ok(items)
}
