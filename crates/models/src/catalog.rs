use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::ContentRecord;

/// One step of a service's delivery process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProcessStep {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A consulting service from the catalog.
///
/// `dependencies` lists ids of other services; they are informational and are
/// never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub process_steps: Vec<ProcessStep>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentRecord for ServiceOffering {
    fn id(&self) -> &str { &self.id }
    fn set_id(&mut self, id: String) { self.id = id; }
    fn title(&self) -> &str { &self.title }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentRecord for Workshop {
    fn id(&self) -> &str { &self.id }
    fn set_id(&mut self, id: String) { self.id = id; }
    fn title(&self) -> &str { &self.title }

    fn validate_fields(&self) -> Result<(), crate::ModelError> {
        if self.max_participants == Some(0) {
            return Err(crate::ModelError::Validation(format!(
                "maxParticipants must be positive (id {})",
                self.id
            )));
        }
        Ok(())
    }
}
