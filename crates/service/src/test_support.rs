#![cfg(test)]
use std::path::PathBuf;

/// Fresh directory under the system temp dir; callers remove it when done.
pub fn temp_data_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}", uuid::Uuid::new_v4()))
}

pub async fn cleanup(dir: &PathBuf) {
    let _ = tokio::fs::remove_dir_all(dir).await;
}
