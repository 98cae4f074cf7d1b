use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEV_SESSION_SECRET: &str = "dev-session-secret-change-me";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Deployment environment. Write gating is only enforced in production.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }

    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(anyhow!("unknown environment '{other}' (expected development|production)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub admin_password: String,
    #[serde(default)]
    pub session_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: String::new(),
            session_secret: String::new(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

/// Settings for the client-side fallback loader.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { base_url: None, timeout_secs: default_timeout_secs(), cache_dir: default_cache_dir() }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("data-store") }
fn default_cache_dir() -> PathBuf { PathBuf::from(".portal-cache") }
fn default_session_ttl_hours() -> i64 { 24 }
fn default_timeout_secs() -> u64 { 5 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or defaults when it is missing), apply environment
    /// overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("{path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from the environment. The lookup is injected so tests
    /// never touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("APP_ENV") {
            self.environment = Environment::parse(&v)?;
        }
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("SERVER_PORT") {
            self.server.port = v.parse().map_err(|_| anyhow!("SERVER_PORT must be a port number, got '{v}'"))?;
        }
        if let Some(v) = lookup("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = v.parse().ok();
        }
        if let Some(v) = lookup("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("ADMIN_PASSWORD") {
            self.auth.admin_password = v;
        }
        if let Some(v) = lookup("SESSION_SECRET") {
            self.auth.session_secret = v;
        }
        if let Some(v) = lookup("CONTENT_REMOTE_URL") {
            self.remote.base_url = Some(v);
        }
        if let Some(v) = lookup("CONTENT_CACHE_DIR") {
            self.remote.cache_dir = PathBuf::from(v);
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.remote.normalize();
        self.auth.normalize_and_validate(self.environment)?;
        if self.storage.data_dir.as_os_str().is_empty() {
            self.storage.data_dir = default_data_dir();
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl RemoteConfig {
    fn normalize(&mut self) {
        // 空字符串视为未配置远端
        self.base_url = self
            .base_url
            .take()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
    }
}

impl AuthConfig {
    fn normalize_and_validate(&mut self, env: Environment) -> Result<()> {
        if self.session_ttl_hours <= 0 {
            self.session_ttl_hours = default_session_ttl_hours();
        }
        if env.is_production() {
            if self.admin_password.is_empty() {
                return Err(anyhow!("auth.admin_password (or ADMIN_PASSWORD) is required in production"));
            }
            if self.session_secret.is_empty() || self.session_secret == DEV_SESSION_SECRET {
                return Err(anyhow!("auth.session_secret (or SESSION_SECRET) must be set in production"));
            }
        } else if self.session_secret.is_empty() {
            self.session_secret = DEV_SESSION_SECRET.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_config_gets_development_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("data-store"));
        assert_eq!(cfg.auth.session_secret, DEV_SESSION_SECRET);
        assert_eq!(cfg.auth.session_ttl_hours, 24);
        assert!(cfg.remote.base_url.is_none());
    }

    #[test]
    fn toml_values_are_read() {
        let cfg = parse(
            r#"
            environment = "production"
            [server]
            host = "0.0.0.0"
            port = 9000
            [storage]
            data_dir = "/srv/portal"
            [remote]
            base_url = "https://portal.example.com/"
            "#,
        )
        .unwrap();
        assert!(cfg.environment.is_production());
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/srv/portal"));
        assert_eq!(cfg.remote.base_url.as_deref(), Some("https://portal.example.com/"));
    }

    #[test]
    fn env_overrides_and_trailing_slash_trimmed() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(lookup(&[
            ("SERVER_PORT", "8181"),
            ("DATA_DIR", "/tmp/ds"),
            ("CONTENT_REMOTE_URL", "http://localhost:8080/"),
            ("ADMIN_PASSWORD", "hunter2"),
        ]))
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 8181);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/tmp/ds"));
        assert_eq!(cfg.remote.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cfg.auth.admin_password, "hunter2");
    }

    #[test]
    fn bad_port_in_env_is_rejected() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(lookup(&[("SERVER_PORT", "http")])).is_err());
    }

    #[test]
    fn production_requires_secrets() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(lookup(&[("APP_ENV", "production")])).unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.apply_env(lookup(&[
            ("APP_ENV", "prod"),
            ("ADMIN_PASSWORD", "pw"),
            ("SESSION_SECRET", DEV_SESSION_SECRET),
        ]))
        .unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.apply_env(lookup(&[
            ("APP_ENV", "production"),
            ("ADMIN_PASSWORD", "pw"),
            ("SESSION_SECRET", "a-real-secret"),
        ]))
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert!(cfg.environment.is_production());
    }
}
