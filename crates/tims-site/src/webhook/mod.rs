//! Deploy Webhook
//!
//! An inbound request is authenticated with an HMAC-SHA256 signature over its
//! raw body, then a fixed deployment script is launched in the background.
//! The payload itself is never inspected or forwarded to the script.

pub mod deploy;
pub mod error;
pub mod signature;

pub use deploy::{Launched, Launcher, ScriptLauncher};
pub use error::{ErrorResponse, LaunchError, WebhookError};
pub use signature::{SignatureVerifier, SIGNATURE_HEADER, SIGNATURE_PREFIX};
