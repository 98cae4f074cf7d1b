use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::ServiceError;

fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    target.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()))
}

/// Write `bytes` to a sibling temp file and rename it over `target`.
pub async fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), ServiceError> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }
    }
    let tmp = temp_path_for(target);
    if let Err(e) = fs::write(&tmp, bytes).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(ServiceError::storage(format!("write {}: {e}", tmp.display())));
    }
    if let Err(e) = fs::rename(&tmp, target).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(ServiceError::storage(format!("rename onto {}: {e}", target.display())));
    }
    Ok(())
}
