//! Command-line interface definitions.
//!
//! Every option has a default, so a bare invocation scrapes the built-in
//! sources and writes `news.json` in the working directory.

use crate::fetcher::DEFAULT_TIMEOUT;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the digest builder.
///
/// # Examples
///
/// ```sh
/// # Built-in sources, ./news.json
/// hot_news_digest
///
/// # Custom output and source list, no request timeout
/// hot_news_digest -o site/data/news.json -s sources.yaml --timeout-secs 0
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON digest to write (overwritten on every run)
    #[arg(short, long, env = "NEWS_DIGEST_OUTPUT", default_value = "news.json")]
    pub output: PathBuf,

    /// Optional YAML file replacing the built-in source list
    #[arg(short, long, env = "NEWS_DIGEST_SOURCES")]
    pub sources: Option<PathBuf>,

    /// Per-request timeout in seconds; 0 disables the timeout
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl Cli {
    /// Request timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
