use axum::Json;
use service::assessment::{self, AssessmentInput, AssessmentResult};

use crate::errors::JsonApiError;

#[utoipa::path(post, path = "/api/assessment", tag = "assessment", request_body = crate::openapi::AssessmentRequest, responses((status = 200, description = "Scored"), (status = 400, description = "Missing or invalid answers")))]
pub async fn evaluate(Json(input): Json<AssessmentInput>) -> Result<Json<AssessmentResult>, JsonApiError> {
    assessment::score(&input.ratings)
        .map(Json)
        .map_err(|e| JsonApiError::bad_request(e.to_string()))
}
