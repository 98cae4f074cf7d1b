use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

pub mod assessment;
pub mod auth;
pub mod content;
pub mod mail;
pub mod pathfinder;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (axum::http::StatusCode, String) {
    common::metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}

/// Build the full application router: public reads, gated writes, auth and docs.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let gate = middleware::from_fn_with_state(state.clone(), auth::require_admin_state);

    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/content", get(content::snapshot))
        .route("/api/content/:category", get(content::read))
        .route("/api/pathfinder", get(pathfinder::list))
        .route("/api/pathfinder/:id", get(pathfinder::get))
        .route("/api/assessment", post(assessment::evaluate))
        .route("/api/mail/status", get(mail::status))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session));

    // 数据接口：读取公开（mail-config 在处理器内校验），写入经过管理员校验
    let data = Router::new()
        .route(
            "/api/data/:category",
            get(content::read).merge(
                put(content::replace)
                    .post(content::replace)
                    .route_layer(gate.clone()),
            ),
        )
        .route(
            "/api/data/:category/records",
            post(content::upsert).route_layer(gate.clone()),
        )
        .route(
            "/api/data/:category/:id",
            get(content::get_record).merge(delete(content::delete).route_layer(gate)),
        );

    public
        .merge(data)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时记录状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
