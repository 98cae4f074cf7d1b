//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the data directory exists before the stores open their files.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}
