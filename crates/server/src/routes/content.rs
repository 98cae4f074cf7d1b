use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use common::types::Removed;
use models::Category;
use serde_json::{Map, Value};
use tracing::info;

use crate::{errors::JsonApiError, routes::auth::{self, ServerState}};

fn parse_category(raw: &str) -> Result<Category, JsonApiError> {
    raw.parse::<Category>().map_err(|e| JsonApiError::bad_request(e.to_string()))
}

#[utoipa::path(
    get, path = "/api/data/{category}", tag = "content",
    params(("category" = String, Path, description = "Category slug, e.g. services")),
    responses((status = 200, description = "Whole category"), (status = 400, description = "Unknown category"), (status = 401, description = "Mail config requires an admin session"))
)]
pub async fn read(
    State(state): State<ServerState>,
    Path(category): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, JsonApiError> {
    let category = parse_category(&category)?;
    if !category.is_public() {
        auth::authorize(&state, &headers)?;
    }
    Ok(Json(state.content.read(category).await?))
}

#[utoipa::path(
    put, path = "/api/data/{category}", tag = "content",
    params(("category" = String, Path, description = "Category slug")),
    responses((status = 200, description = "Stored payload"), (status = 400, description = "Validation Error"), (status = 401, description = "Unauthorized"))
)]
pub async fn replace(
    State(state): State<ServerState>,
    Path(category): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, JsonApiError> {
    let category = parse_category(&category)?;
    let stored = state.content.replace(category, payload).await?;
    info!(%category, "category replaced");
    Ok(Json(stored))
}

#[utoipa::path(
    post, path = "/api/data/{category}/records", tag = "content",
    params(("category" = String, Path, description = "Collection slug")),
    responses((status = 200, description = "Stored record"), (status = 400, description = "Validation Error"), (status = 401, description = "Unauthorized"))
)]
pub async fn upsert(
    State(state): State<ServerState>,
    Path(category): Path<String>,
    Json(record): Json<Value>,
) -> Result<Json<Value>, JsonApiError> {
    let category = parse_category(&category)?;
    Ok(Json(state.content.upsert(category, record).await?))
}

pub async fn get_record(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<Value>, JsonApiError> {
    let category = parse_category(&category)?;
    Ok(Json(state.content.get_record(category, &id).await?))
}

#[utoipa::path(
    delete, path = "/api/data/{category}/{id}", tag = "content",
    params(("category" = String, Path, description = "Collection slug"), ("id" = String, Path, description = "Record id")),
    responses((status = 200, description = "Deleted or already absent"), (status = 401, description = "Unauthorized"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<Removed>, JsonApiError> {
    let category = parse_category(&category)?;
    let removed = state.content.delete(category, &id).await?;
    Ok(Json(Removed { removed }))
}

/// All public categories in one object keyed by slug.
#[utoipa::path(get, path = "/api/content", tag = "content", responses((status = 200, description = "Public content")))]
pub async fn snapshot(State(state): State<ServerState>) -> Result<Json<Map<String, Value>>, JsonApiError> {
    Ok(Json(state.content.snapshot_public().await?))
}
