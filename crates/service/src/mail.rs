//! Mail settings resolution.
//!
//! The persisted `mail-config.json` is authoritative. `MAIL_CONFIG` (a JSON
//! document in the environment) only seeds an empty store at startup and is
//! consulted as a fallback; the process environment is never mutated.

use models::MailConfig;
use serde::Serialize;
use tracing::{info, warn};

use crate::{content::ContentService, errors::ServiceError};

pub const MAIL_CONFIG_ENV: &str = "MAIL_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailSource {
    Store,
    Env,
}

/// Parse the `MAIL_CONFIG` payload and validate it.
pub fn parse_env_config(raw: &str) -> Result<MailConfig, ServiceError> {
    let cfg: MailConfig = serde_json::from_str(raw)
        .map_err(|e| ServiceError::Validation(format!("{MAIL_CONFIG_ENV} is not valid JSON: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Copy `MAIL_CONFIG` into the store when nothing is stored yet.
/// Returns whether the store was seeded.
pub async fn seed_from_env(content: &ContentService, env_value: Option<&str>) -> Result<bool, ServiceError> {
    if content.mail_config().await.is_some() {
        return Ok(false);
    }
    let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
        return Ok(false);
    };
    match parse_env_config(raw) {
        Ok(cfg) => {
            content.set_mail_config(cfg).await?;
            info!("mail config seeded from {MAIL_CONFIG_ENV}");
            Ok(true)
        }
        Err(e) => {
            warn!(error = %e, "ignoring invalid {MAIL_CONFIG_ENV}");
            Ok(false)
        }
    }
}

/// Effective mail settings: stored config first, then `MAIL_CONFIG`.
pub async fn resolve(content: &ContentService, env_value: Option<&str>) -> Option<(MailConfig, MailSource)> {
    if let Some(cfg) = content.mail_config().await {
        return Some((cfg, MailSource::Store));
    }
    env_value
        .and_then(|raw| parse_env_config(raw).ok())
        .map(|cfg| (cfg, MailSource::Env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup, temp_data_dir};

    const ENV_JSON: &str = r#"{"host":"smtp.example.com","port":587,"auth":{"user":"u","pass":"p"},"from":"portal@example.com"}"#;

    #[tokio::test]
    async fn env_seeds_empty_store_once() -> anyhow::Result<()> {
        let dir = temp_data_dir("mail_seed");
        let content = ContentService::open(&dir).await?;
        assert!(seed_from_env(&content, Some(ENV_JSON)).await?);
        assert!(!seed_from_env(&content, Some(ENV_JSON)).await?);

        let (cfg, source) = resolve(&content, None).await.unwrap();
        assert_eq!(source, MailSource::Store);
        assert_eq!(cfg.host, "smtp.example.com");

        // persisted across reopen
        let reopened = ContentService::open(&dir).await?;
        assert!(reopened.mail_config().await.is_some());
        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn falls_back_to_env_and_ignores_garbage() -> anyhow::Result<()> {
        let dir = temp_data_dir("mail_resolve");
        let content = ContentService::open(&dir).await?;
        assert!(resolve(&content, None).await.is_none());
        assert!(resolve(&content, Some("{oops")).await.is_none());
        assert_eq!(resolve(&content, Some(ENV_JSON)).await.map(|(_, s)| s), Some(MailSource::Env));
        assert!(!seed_from_env(&content, Some("{oops")).await?);
        cleanup(&dir).await;
        Ok(())
    }
}
