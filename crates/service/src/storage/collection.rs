use std::{path::Path, sync::Arc};

use models::{record::validate_collection, Category, ContentRecord};
use tracing::info;

use super::json_file_store::JsonFileStore;
use crate::errors::ServiceError;

/// A collection category persisted as a JSON array in `<data_dir>/<slug>.json`.
pub struct CollectionStore<T> {
    category: Category,
    file: Arc<JsonFileStore<Vec<T>>>,
}

impl<T: ContentRecord> CollectionStore<T> {
    pub async fn open(data_dir: &Path, category: Category, defaults: Vec<T>) -> Result<Self, ServiceError> {
        let file = JsonFileStore::open(data_dir.join(category.file_name()), defaults).await?;
        Ok(Self { category, file })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub async fn list(&self) -> Vec<T> {
        self.file.read().await
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.file.read().await.into_iter().find(|r| r.id() == id)
    }

    /// Wholesale replace. All records are validated and ids must be unique.
    pub async fn replace_all(&self, records: Vec<T>) -> Result<Vec<T>, ServiceError> {
        validate_collection(&records)?;
        self.file.write(records.clone()).await?;
        info!(category = %self.category, count = records.len(), "collection replaced");
        Ok(records)
    }

    /// Insert or replace one record by id. A blank id gets a fresh UUID.
    pub async fn upsert(&self, mut record: T) -> Result<T, ServiceError> {
        if record.id().trim().is_empty() {
            record.set_id(uuid::Uuid::new_v4().to_string());
        }
        record.validate()?;
        let saved = record.clone();
        let created = self
            .file
            .update(move |records| {
                match records.iter_mut().find(|r| r.id() == record.id()) {
                    Some(existing) => {
                        *existing = record;
                        Ok(false)
                    }
                    None => {
                        records.push(record);
                        Ok(true)
                    }
                }
            })
            .await?;
        info!(category = %self.category, id = %saved.id(), created, "record upserted");
        Ok(saved)
    }

    /// Remove the record with `id`. Deleting an absent id is a no-op and
    /// returns `false` without touching the file.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        if self.get(id).await.is_none() {
            return Ok(false);
        }
        let removed = self
            .file
            .update(|records| {
                let before = records.len();
                records.retain(|r| r.id() != id);
                Ok(before - records.len())
            })
            .await?;
        info!(category = %self.category, %id, removed, "record deleted");
        Ok(removed > 0)
    }
}
