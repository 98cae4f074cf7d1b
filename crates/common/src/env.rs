//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists and is writable.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;

    let meta = tokio::fs::metadata(data_dir).await?;
    if meta.permissions().readonly() {
        warn!(data_dir = %data_dir.display(), "data directory is read-only; content writes will fail");
    } else {
        info!(data_dir = %data_dir.display(), "data directory ready");
    }
    Ok(())
}
