//! JSON output for the site build.
//!
//! The digest is written as pretty JSON with 2-space indentation. Chinese
//! text is emitted literally rather than `\u` escaped. Each run replaces the
//! previous file wholesale.

use crate::models::NewsDigest;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Render a [`NewsDigest`] as the JSON document consumed downstream.
pub fn render_digest(digest: &NewsDigest) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(digest)
}

/// Write a [`NewsDigest`] to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization, directory creation, or the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_digest(digest: &NewsDigest, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = render_digest(digest)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Failed to create output directory");
        return Err(e);
    }

    fs::write(path, json).await?;
    info!(
        count = digest.news.len(),
        "Successfully updated news file"
    );
    Ok(())
}
