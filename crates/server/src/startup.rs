use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use service::{
    auth::{AdminAuth, AuthConfig},
    content::ContentService,
    mail, runtime,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the stores and assemble the shared state from a validated config.
pub async fn build_state(cfg: &AppConfig, mail_env: Option<String>) -> anyhow::Result<ServerState> {
    runtime::ensure_env(&cfg.storage.data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let content = ContentService::open(&cfg.storage.data_dir).await?;
    mail::seed_from_env(&content, mail_env.as_deref()).await?;

    if cfg.auth.admin_password.is_empty() {
        warn!("ADMIN_PASSWORD not set; admin login is disabled");
    }
    let auth = AdminAuth::new(AuthConfig {
        admin_password: cfg.auth.admin_password.clone(),
        session_secret: cfg.auth.session_secret.clone(),
        session_ttl: chrono::Duration::hours(cfg.auth.session_ttl_hours),
    });

    Ok(ServerState { content, auth: Arc::new(auth), environment: cfg.environment, mail_env })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = build_state(&cfg, std::env::var(mail::MAIL_CONFIG_ENV).ok()).await?;

    let app: Router = routes::build_router(build_cors(), state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, environment = ?cfg.environment, data_dir = %cfg.storage.data_dir.display(), "starting portal server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
