use std::{fmt, path::Path, time::Duration};

use configs::AppConfig;
use models::Category;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    errors::{LoadError, SourceError},
    sources::{CacheSource, ContentSource, DefaultSource, KeyValueSource, RemoteSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Remote,
    Cache,
    KeyValue,
    Default,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Remote => "remote",
            Tier::Cache => "cache",
            Tier::KeyValue => "key-value",
            Tier::Default => "default",
        })
    }
}

/// Data plus the tier that served it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome<T = Value> {
    pub tier: Tier,
    pub data: T,
}

/// Per-tier result of a write. `remote` is `None` when no remote is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub remote: Option<bool>,
    pub cache: bool,
    pub key_value: bool,
}

/// `null`, `[]` and `{}` carry no content.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

pub struct ContentLoader {
    sources: Vec<Box<dyn ContentSource>>,
}

impl ContentLoader {
    /// Sources are tried in the given order.
    pub fn new(sources: Vec<Box<dyn ContentSource>>) -> Self {
        Self { sources }
    }

    /// Standard chain: remote (when `base_url` is set), file cache, key-value
    /// map, defaults.
    pub async fn local(
        cache_dir: &Path,
        remote: Option<RemoteSource>,
    ) -> Result<Self, LoadError> {
        let mut sources: Vec<Box<dyn ContentSource>> = Vec::with_capacity(4);
        if let Some(remote) = remote {
            sources.push(Box::new(remote));
        }
        sources.push(Box::new(CacheSource::new(cache_dir)));
        sources.push(Box::new(KeyValueSource::open(cache_dir).await?));
        sources.push(Box::new(DefaultSource));
        Ok(Self::new(sources))
    }

    pub async fn from_config(cfg: &AppConfig, token: Option<String>) -> Result<Self, LoadError> {
        let remote = match &cfg.remote.base_url {
            Some(url) => {
                let source = RemoteSource::new(url.clone(), Duration::from_secs(cfg.remote.timeout_secs))?;
                Some(match token {
                    Some(t) => source.with_token(t),
                    None => source,
                })
            }
            None => None,
        };
        Self::local(&cfg.remote.cache_dir, remote).await
    }

    pub fn tiers(&self) -> Vec<Tier> {
        self.sources.iter().map(|s| s.tier()).collect()
    }

    /// First non-empty payload in tier order.
    pub async fn load(&self, category: Category) -> Result<LoadOutcome, LoadError> {
        self.load_with(category, Ok).await
    }

    /// Like [`load`](Self::load), but a payload that does not decode into `T`
    /// counts as a failed tier.
    pub async fn load_typed<T: DeserializeOwned>(&self, category: Category) -> Result<LoadOutcome<T>, LoadError> {
        self.load_with(category, |v| serde_json::from_value(v).map_err(SourceError::from)).await
    }

    async fn load_with<T, F>(&self, category: Category, decode: F) -> Result<LoadOutcome<T>, LoadError>
    where
        F: Fn(Value) -> Result<T, SourceError>,
    {
        for source in &self.sources {
            let tier = source.tier();
            let value = match source.load(category).await {
                Ok(Some(v)) if !is_empty(&v) => v,
                Ok(_) => {
                    debug!(%category, %tier, "tier empty");
                    continue;
                }
                Err(e) => {
                    warn!(%category, %tier, error = %e, "tier failed, falling back");
                    continue;
                }
            };
            match decode(value) {
                Ok(data) => {
                    debug!(%category, %tier, "content loaded");
                    return Ok(LoadOutcome { tier, data });
                }
                Err(e) => warn!(%category, %tier, error = %e, "tier returned undecodable data, falling back"),
            }
        }
        Err(LoadError::Exhausted(category))
    }

    /// Write to the remote when configured, and to both local caches
    /// regardless of the remote result. Individual failures are logged.
    pub async fn save(&self, category: Category, data: &Value) -> WriteReport {
        let mut report = WriteReport::default();
        for source in &self.sources {
            let tier = source.tier();
            if tier == Tier::Default {
                continue;
            }
            let ok = match source.store(category, data).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(%category, %tier, error = %e, "write failed");
                    false
                }
            };
            match tier {
                Tier::Remote => report.remote = Some(ok),
                Tier::Cache => report.cache = ok,
                Tier::KeyValue => report.key_value = ok,
                Tier::Default => {}
            }
        }
        info!(%category, ?report, "content saved");
        report
    }
}
