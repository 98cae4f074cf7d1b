use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    errors::ModelError,
    record::{validate_link, ContentRecord},
};

/// Best practices and resources share one shape: a titled entry with an
/// optional download and/or external link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type BestPractice = KnowledgeItem;
pub type Resource = KnowledgeItem;

impl ContentRecord for KnowledgeItem {
    fn id(&self) -> &str { &self.id }
    fn set_id(&mut self, id: String) { self.id = id; }
    fn title(&self) -> &str { &self.title }

    fn validate_fields(&self) -> Result<(), ModelError> {
        validate_link("downloadUrl", self.download_url.as_deref())?;
        validate_link("externalUrl", self.external_url.as_deref())
    }
}
