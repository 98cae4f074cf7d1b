use std::path::PathBuf;

use async_trait::async_trait;
use models::Category;
use serde_json::Value;
use service::storage::atomic::write_atomic;
use tokio::fs;

use super::ContentSource;
use crate::{errors::SourceError, loader::Tier};

/// One pretty-printed JSON file per category, named like the server's data files.
pub struct CacheSource {
    dir: PathBuf,
}

impl CacheSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, category: Category) -> PathBuf {
        self.dir.join(category.file_name())
    }
}

#[async_trait]
impl ContentSource for CacheSource {
    fn tier(&self) -> Tier {
        Tier::Cache
    }

    async fn load(&self, category: Category) -> Result<Option<Value>, SourceError> {
        let bytes = match fs::read(self.path(category)).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn store(&self, category: Category, data: &Value) -> Result<(), SourceError> {
        let bytes = serde_json::to_vec_pretty(data)?;
        write_atomic(&self.path(category), &bytes).await?;
        Ok(())
    }
}
