//! Hot-news container scraping (Sina News).
//!
//! The homepage groups its trending stories in a single container element.
//! When that container is present every link inside it is a candidate. When
//! a redesign removes it, the whole page is scanned instead and links wrapping
//! an `<img>` are skipped, since those are thumbnails and banners.
//!
//! The fallback is a heuristic: it may pick up navigation links with long
//! enough text.

use super::{ExtractError, MAX_ITEMS_PER_SOURCE, headline_text, parse_selector};
use crate::models::NewsItem;
use crate::sources::SourceConfig;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("`a` is a valid selector"));
static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("`img` is a valid selector"));

pub(super) fn extract(
    document: &Html,
    source: &SourceConfig,
    container: &str,
) -> Result<Vec<NewsItem>, ExtractError> {
    let container_selector = parse_selector(container)?;

    let items = match document.select(&container_selector).next() {
        Some(section) => section
            .select(&LINK_SELECTOR)
            .filter_map(|link| to_item(link, source))
            .take(MAX_ITEMS_PER_SOURCE)
            .collect(),
        None => {
            warn!(container, "Could not find hot news section; scanning all links");
            document
                .select(&LINK_SELECTOR)
                .filter(|link| link.select(&IMAGE_SELECTOR).next().is_none())
                .filter_map(|link| to_item(link, source))
                .take(MAX_ITEMS_PER_SOURCE)
                .collect()
        }
    };

    Ok(items)
}

fn to_item(link: ElementRef<'_>, source: &SourceConfig) -> Option<NewsItem> {
    let title = headline_text(&link)?;
    let url = link.value().attr("href").unwrap_or(&source.url).to_string();
    Some(NewsItem {
        title,
        source: source.label.clone(),
        category: source.category.clone(),
        url,
    })
}
