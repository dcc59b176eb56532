//! Webhook error types.

use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the deploy webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request carried no signature header.
    #[error("No signature provided")]
    MissingSignature,

    /// The signature header did not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The deployment script could not be started.
    #[error("Deployment failed")]
    Launch(#[from] LaunchError),
}

/// Failure to start the deployment script.
///
/// `Display` output is returned to callers and never includes the script
/// path. The path is available on the variant for server-side logging.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The configured script does not exist or is not a regular file.
    #[error("deployment script not found")]
    ScriptMissing { path: PathBuf },

    /// The interpreter process could not be spawned.
    #[error("failed to start deployment script: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Script path the launch was attempted with.
    pub fn path(&self) -> &Path {
        match self {
            Self::ScriptMissing { path } | Self::Spawn { path, .. } => path.as_path(),
        }
    }
}

/// JSON body for webhook errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            Self::MissingSignature | Self::InvalidSignature => (StatusCode::UNAUTHORIZED, None),
            Self::Launch(e) => (StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string())),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
