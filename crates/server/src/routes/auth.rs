use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use configs::Environment;
use serde::Serialize;
use service::{
    auth::{domain::LoginInput, AdminAuth, SESSION_COOKIE},
    content::ContentService,
};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub content: Arc<ContentService>,
    pub auth: Arc<AdminAuth>,
    pub environment: Environment,
    /// Raw `MAIL_CONFIG` captured at startup.
    pub mail_env: Option<String>,
}

#[derive(Serialize)]
pub struct LoginOutput { pub authenticated: bool, pub expires_at: DateTime<Utc> }

#[derive(Serialize)]
pub struct SessionOutput { pub authenticated: bool }

fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(max_age_secs));
    cookie
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = match state.auth.login(&input) {
        Ok(s) => s,
        Err(e) => {
            common::metrics::record_login(false);
            return Err(e.into());
        }
    };
    common::metrics::record_login(true);
    let cookie = session_cookie(
        session.token,
        state.auth.session_ttl().num_seconds(),
        state.environment.is_production(),
    );
    Ok((jar.add(cookie), Json(LoginOutput { authenticated: true, expires_at: session.expires_at })))
}

/// Always answers with an expired `admin_session`, whether or not the request carried one.
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut gone = session_cookie(String::new(), 0, state.environment.is_production());
    gone.make_removal();
    (jar.add(gone), StatusCode::NO_CONTENT)
}

pub async fn session(State(state): State<ServerState>, headers: HeaderMap) -> Json<SessionOutput> {
    let authenticated = session_token(&headers)
        .map(|t| state.auth.verify(&t).is_ok())
        .unwrap_or(false);
    Json(SessionOutput { authenticated })
}

/// Token from `Authorization: Bearer <token>`, falling back to the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    // 非 Bearer 的 Authorization（如 Basic）不影响 Cookie 会话
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(t) = bearer {
        return Some(t.to_string());
    }
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Enforce an admin session in production; development lets everything through.
pub fn authorize(state: &ServerState, headers: &HeaderMap) -> Result<(), JsonApiError> {
    if !state.environment.is_production() {
        return Ok(());
    }
    let token = session_token(headers).ok_or_else(|| {
        tracing::warn!("missing admin session");
        JsonApiError::unauthorized("admin session required")
    })?;
    state.auth.verify(&token).map(|_| ()).map_err(|e| {
        tracing::warn!(err = %e, "admin session rejected");
        JsonApiError::from(e)
    })
}

/// 写操作中间件：生产环境下校验管理员会话（Cookie 或 Bearer），开发环境放行
pub async fn require_admin_state(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Response {
    match authorize(&state, req.headers()) {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}
