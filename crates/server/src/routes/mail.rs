use axum::{extract::State, Json};
use serde::Serialize;
use service::mail::{self, MailSource};

use crate::routes::auth::ServerState;

#[derive(Serialize)]
pub struct MailStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<MailSource>,
}

/// Whether outgoing mail is configured, without exposing the settings.
pub async fn status(State(state): State<ServerState>) -> Json<MailStatus> {
    let resolved = mail::resolve(&state.content, state.mail_env.as_deref()).await;
    Json(MailStatus { configured: resolved.is_some(), source: resolved.map(|(_, s)| s) })
}
