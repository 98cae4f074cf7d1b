use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MailAuth {
    pub user: String,
    #[serde(default)]
    pub pass: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Debug for MailAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailAuth")
            .field("user", &self.user)
            .field("pass", &"***")
            .finish()
    }
}

/// SMTP settings used by the contact and booking forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub auth: MailAuth,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl MailConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.host.trim().is_empty() {
            return Err(ModelError::required("host"));
        }
        if self.port == 0 {
            return Err(ModelError::Validation("port must be in 1..=65535".into()));
        }
        if !self.from.contains('@') {
            return Err(ModelError::Validation(format!("from must be an address, got '{}'", self.from)));
        }
        Ok(())
    }
}
