use async_trait::async_trait;
use models::{defaults, Category};
use serde_json::Value;

use super::ContentSource;
use crate::{errors::SourceError, loader::Tier};

/// Built-in datasets, the last resort. Read-only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSource;

#[async_trait]
impl ContentSource for DefaultSource {
    fn tier(&self) -> Tier {
        Tier::Default
    }

    async fn load(&self, category: Category) -> Result<Option<Value>, SourceError> {
        Ok(Some(defaults::for_category(category)))
    }
}
