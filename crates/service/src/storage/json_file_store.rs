use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use super::atomic::write_atomic;
use crate::errors::ServiceError;

/// A whole JSON document persisted in one file with an in-memory mirror.
///
/// Reads are served from the mirror. Every write serializes the full value,
/// replaces the file atomically and only then swaps the mirror, so a failed
/// write leaves both the file and the mirror at the previous value. Writers
/// in this process are serialized by the lock; other processes writing the
/// same file still race (last writer wins).
pub struct JsonFileStore<T> {
    inner: RwLock<T>,
    file_path: PathBuf,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open the file at `path`. A missing or empty file is seeded with `defaults`.
    /// A file that exists but does not parse is an error and is left untouched.
    pub async fn open<P: Into<PathBuf>>(path: P, defaults: T) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();

        let value = match fs::read(&file_path).await {
            Ok(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => {
                serde_json::from_slice(&bytes).map_err(|e| ServiceError::Corrupt {
                    path: file_path.clone(),
                    reason: e.to_string(),
                })?
            }
            Ok(_) => {
                info!(path = %file_path.display(), "empty data file, seeding defaults");
                persist(&file_path, &defaults).await?;
                defaults
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %file_path.display(), "data file missing, seeding defaults");
                persist(&file_path, &defaults).await?;
                defaults
            }
            Err(e) => return Err(ServiceError::storage(format!("read {}: {e}", file_path.display()))),
        };

        Ok(Arc::new(Self { inner: RwLock::new(value), file_path }))
    }

    /// Clone of the current document.
    pub async fn read(&self) -> T {
        self.inner.read().await.clone()
    }

    /// Replace the whole document and persist.
    pub async fn write(&self, value: T) -> Result<(), ServiceError> {
        let mut guard = self.inner.write().await;
        persist(&self.file_path, &value).await?;
        *guard = value;
        debug!(path = %self.file_path.display(), "document written");
        Ok(())
    }

    /// Apply a mutation to a copy of the document, persist it, then publish it.
    /// Nothing is written when `f` fails.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut T) -> Result<R, ServiceError>,
    {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        persist(&self.file_path, &next).await?;
        *guard = next;
        Ok(out)
    }

    /// Drop the mirror and re-read the file, e.g. after an external edit.
    pub async fn reload(&self) -> Result<T, ServiceError> {
        let mut guard = self.inner.write().await;
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::storage(format!("read {}: {e}", self.file_path.display())))?;
        let value: T = serde_json::from_slice(&bytes).map_err(|e| ServiceError::Corrupt {
            path: self.file_path.clone(),
            reason: e.to_string(),
        })?;
        *guard = value.clone();
        Ok(value)
    }
}

async fn persist<T: Serialize>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value).map_err(ServiceError::storage)?;
    write_atomic(path, &data).await
}
