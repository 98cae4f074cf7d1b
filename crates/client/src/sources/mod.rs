//! Content sources in fallback order.

mod cache;
mod defaults;
mod key_value;
mod remote;

use async_trait::async_trait;
use models::Category;
use serde_json::Value;

use crate::{errors::SourceError, loader::Tier};

pub use cache::CacheSource;
pub use defaults::DefaultSource;
pub use key_value::KeyValueSource;
pub use remote::RemoteSource;

#[async_trait]
pub trait ContentSource: Send + Sync {
    fn tier(&self) -> Tier;

    /// `Ok(None)` means the source has nothing for this category.
    async fn load(&self, category: Category) -> Result<Option<Value>, SourceError>;

    async fn store(&self, _category: Category, _data: &Value) -> Result<(), SourceError> {
        Err(SourceError::ReadOnly(self.tier()))
    }
}
