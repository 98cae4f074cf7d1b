use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub password: String }

#[derive(ToSchema)]
pub struct AssessmentRequest {
    /// Six ratings from 1 to 5 in questionnaire order.
    pub ratings: Vec<u8>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::content::read,
        crate::routes::content::replace,
        crate::routes::content::upsert,
        crate::routes::content::delete,
        crate::routes::content::snapshot,
        crate::routes::pathfinder::list,
        crate::routes::pathfinder::get,
        crate::routes::assessment::evaluate,
    ),
    components(schemas(HealthResponse, LoginRequest, AssessmentRequest)),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "content"),
        (name = "pathfinder"),
        (name = "assessment")
    )
)]
pub struct ApiDoc;
