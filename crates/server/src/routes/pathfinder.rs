use axum::{extract::Path, http::StatusCode, Json};
use models::{pathfinder, PathfinderUnit};

use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/pathfinder", tag = "pathfinder", responses((status = 200, description = "All units")))]
pub async fn list() -> Json<&'static [PathfinderUnit]> {
    Json(pathfinder::all())
}

#[utoipa::path(
    get, path = "/api/pathfinder/{id}", tag = "pathfinder",
    params(("id" = String, Path, description = "Unit id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(Path(id): Path<String>) -> Result<Json<&'static PathfinderUnit>, JsonApiError> {
    pathfinder::find(&id)
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("unknown unit '{id}'"))))
}
