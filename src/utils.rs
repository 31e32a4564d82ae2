//! Small helpers for date stamping, log previews and output paths.

use chrono::Local;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Current local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters and a `"…(+N bytes)"` marker is
/// appended. Cuts always fall on a character boundary, so multi-byte text is
/// safe to preview.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("新浪新闻", 2), "新浪…(+6 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Create the parent directory of `path` if it does not exist yet.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
        debug!(parent = %parent.display(), "Output directory ready");
    }
    Ok(())
}
