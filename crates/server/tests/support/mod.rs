#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use configs::{AppConfig, Environment};
use server::routes::{self, auth::ServerState};
use tower::ServiceExt;

pub const PASSWORD: &str = "Pathfinder!2024";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub data_dir: PathBuf,
}

impl TestApp {
    pub async fn call(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("router is infallible")
    }

    pub async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.data_dir).await;
    }
}

pub fn config(environment: Environment, data_dir: &PathBuf) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.environment = environment;
    cfg.storage.data_dir = data_dir.clone();
    cfg.auth.admin_password = PASSWORD.into();
    cfg.auth.session_secret = "integration-test-secret".into();
    cfg.normalize_and_validate().expect("valid test config");
    cfg
}

pub async fn build_app(environment: Environment) -> anyhow::Result<TestApp> {
    build_app_with_mail(environment, None).await
}

pub async fn build_app_with_mail(environment: Environment, mail_env: Option<String>) -> anyhow::Result<TestApp> {
    let data_dir = std::env::temp_dir().join(format!("portal_it_{}", uuid::Uuid::new_v4()));
    let cfg = config(environment, &data_dir);
    let state = server::startup::build_state(&cfg, mail_env).await?;
    let router = routes::build_router(tower_http::cors::CorsLayer::very_permissive(), state.clone());
    Ok(TestApp { router, state, data_dir })
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// `admin_session=<token>` from a login response, ready for a `cookie` header.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("admin_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// The raw `Set-Cookie` header for `admin_session`.
pub fn set_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("admin_session="))
        .map(str::to_string)
}
