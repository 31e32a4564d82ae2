//! # Hot News Digest
//!
//! Scrapes trending headlines from Chinese news portals and writes a small
//! daily JSON digest for a static site build to pick up.
//!
//! ## Usage
//!
//! ```sh
//! hot_news_digest -o ./news.json
//! ```
//!
//! ## Architecture
//!
//! Each run is a single sequential pass:
//! 1. **Fetching**: GET each source homepage with a browser User-Agent
//! 2. **Extracting**: Select headline links with the source's selection rule
//! 3. **Merging**: Dedupe by title (first seen wins) and keep the top 15
//! 4. **Output**: Overwrite the JSON digest
//!
//! A source that fails to fetch or parse contributes nothing; only a failed
//! write makes the run fail.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod digest;
mod fetcher;
mod models;
mod outputs;
mod scrapers;
mod sources;
mod utils;

use cli::Cli;
use fetcher::HttpFetcher;
use outputs::json;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("hot_news_digest starting up");

    let args = Cli::parse();
    debug!(?args.output, ?args.sources, args.timeout_secs, "Parsed CLI arguments");

    let sources = match &args.sources {
        Some(path) => sources::load_sources(path).await.inspect_err(|e| {
            error!(error = %e, "Failed to load source list");
        })?,
        None => sources::default_sources(),
    };

    let fetcher = HttpFetcher::new(args.timeout())?;
    let digest = digest::build_digest(&fetcher, &sources).await;

    if let Err(e) = json::write_digest(&digest, &args.output).await {
        error!(path = %args.output.display(), error = %e, "Failed to write digest");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = digest.news.len(),
        path = %args.output.display(),
        "Execution complete"
    );

    Ok(())
}
