//! News source definitions.
//!
//! A source pairs a portal homepage with the labels stamped on its items and
//! the [`SelectionRule`] used to pick headline elements out of its markup.
//! The two built-in portals are returned by [`default_sources`]; an operator
//! may replace them with a YAML list via [`load_sources`].
//!
//! # YAML Format
//!
//! ```yaml
//! - name: sina
//!   url: https://news.sina.com.cn/
//!   label: 新浪新闻
//!   category: 热点
//!   rule:
//!     strategy: hot_section
//!     container: .news-hot
//! - name: toutiao
//!   url: https://www.toutiao.com/
//!   label: 今日头条
//!   category: 热点
//!   rule:
//!     strategy: feed_cards
//!     card: div.feed-card-item
//!     title: a.feed-card-title
//!     origin: https://www.toutiao.com
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Category label shared by every built-in source.
pub const HOT_CATEGORY: &str = "热点";

/// How headline elements are located in a source's markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SelectionRule {
    /// Links inside a hot-news container, falling back to every image-free
    /// link on the page when the container is missing.
    HotSection {
        /// CSS selector of the container element.
        container: String,
    },
    /// Repeated card elements, each holding one title link with a relative `href`.
    FeedCards {
        /// CSS selector of a card.
        card: String,
        /// CSS selector of the title link nested in a card.
        title: String,
        /// Site origin prepended to the relative `href`.
        origin: String,
    },
}

/// One configured news portal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Short identifier used in logs.
    pub name: String,
    /// Homepage fetched for headlines.
    pub url: String,
    /// Value written to [`NewsItem::source`](crate::models::NewsItem::source).
    pub label: String,
    /// Value written to [`NewsItem::category`](crate::models::NewsItem::category).
    pub category: String,
    /// How headline elements are picked out of the homepage markup.
    pub rule: SelectionRule,
}

/// Errors raised while loading a source list from disk.
#[derive(Debug, Error)]
pub enum SourceConfigError {
    #[error("failed to read sources file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed sources file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("source `{name}` has an invalid url `{url}`: {source}")]
    InvalidUrl {
        name: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The built-in portals, in the order they contribute to the digest.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            name: "sina".to_string(),
            url: "https://news.sina.com.cn/".to_string(),
            label: "新浪新闻".to_string(),
            category: HOT_CATEGORY.to_string(),
            rule: SelectionRule::HotSection {
                container: ".news-hot".to_string(),
            },
        },
        SourceConfig {
            name: "toutiao".to_string(),
            url: "https://www.toutiao.com/".to_string(),
            label: "今日头条".to_string(),
            category: HOT_CATEGORY.to_string(),
            rule: SelectionRule::FeedCards {
                card: "div.feed-card-item".to_string(),
                title: "a.feed-card-title".to_string(),
                origin: "https://www.toutiao.com".to_string(),
            },
        },
    ]
}

/// Parse a YAML source list and validate every homepage URL.
pub fn parse_sources(yaml: &str) -> Result<Vec<SourceConfig>, SourceConfigError> {
    let sources: Vec<SourceConfig> = serde_yaml::from_str(yaml)?;
    for source in &sources {
        Url::parse(&source.url).map_err(|e| SourceConfigError::InvalidUrl {
            name: source.name.clone(),
            url: source.url.clone(),
            source: e,
        })?;
    }
    Ok(sources)
}

/// Load a source list from a YAML file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_sources(path: &Path) -> Result<Vec<SourceConfig>, SourceConfigError> {
    let yaml = fs::read_to_string(path)
        .await
        .map_err(|e| SourceConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    let sources = parse_sources(&yaml)?;
    info!(count = sources.len(), "Loaded source list");
    Ok(sources)
}
