//! Deploy Webhook Handler

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::{
    state::AppState,
    webhook::{WebhookError, SIGNATURE_HEADER},
};

/// JSON body returned when a deployment was started.
#[derive(Debug, Serialize)]
pub struct DeployResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Handler for `POST /webhook/deploy`.
///
/// The body is taken as raw bytes so the signature is checked against exactly
/// what was sent.
pub async fn deploy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DeployResponse>, WebhookError> {
    let signature = headers.get(SIGNATURE_HEADER).map(|v| v.as_bytes());
    state.verifier().verify(signature, &body)?;

    info!("valid deployment webhook received, triggering deployment");

    let launched = state.launcher().launch().map_err(|e| {
        error!(script = %e.path().display(), error = ?e, "deployment launch failed");
        e
    })?;

    info!(pid = ?launched.pid, "deployment script triggered");

    Ok(Json(DeployResponse {
        status: "success",
        message: "Deployment triggered",
    }))
}
