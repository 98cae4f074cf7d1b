use std::{collections::HashMap, hash::Hash, io::ErrorKind, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use super::atomic::write_atomic;
use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` to a JSON file. Used for cache-like state where
/// losing the content is acceptable: an unreadable file is reset to an empty
/// map with a warning instead of failing.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "unreadable map file, starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                let data = serde_json::to_vec(&empty).map_err(ServiceError::storage)?;
                write_atomic(&file_path, &data).await?;
                empty
            }
            Err(e) => return Err(ServiceError::storage(format!("read {}: {e}", file_path.display()))),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    async fn save(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(map).map_err(ServiceError::storage)?;
        write_atomic(&self.file_path, &data).await
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        self.save(&map).await
    }
}
