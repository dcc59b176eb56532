//! Startup error types.

use std::net::SocketAddr;

use thiserror::Error;

use crate::{config::ConfigError, content::CatalogError};

/// Result type for site startup.
pub type SiteResult<T> = Result<T, SiteError>;

/// Errors that stop the site from starting or serving.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The research catalog failed validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Bind failed.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
