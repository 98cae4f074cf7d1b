use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use models::Category;
use serde_json::Value;
use service::storage::JsonMapStore;

use super::ContentSource;
use crate::{errors::SourceError, loader::Tier};

pub const KV_FILE: &str = "kv.json";

/// All categories in a single map file keyed by slug.
pub struct KeyValueSource {
    store: Arc<JsonMapStore<String, Value>>,
}

impl KeyValueSource {
    pub async fn open(dir: &Path) -> Result<Self, SourceError> {
        tokio::fs::create_dir_all(dir).await?;
        let store = JsonMapStore::new(dir.join(KV_FILE)).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl ContentSource for KeyValueSource {
    fn tier(&self) -> Tier {
        Tier::KeyValue
    }

    async fn load(&self, category: Category) -> Result<Option<Value>, SourceError> {
        Ok(self.store.get(&category.slug().to_string()).await)
    }

    async fn store(&self, category: Category, data: &Value) -> Result<(), SourceError> {
        self.store.insert(category.slug().to_string(), data.clone()).await?;
        Ok(())
    }
}
