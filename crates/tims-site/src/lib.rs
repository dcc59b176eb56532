//! TIMS Taxonomy Website Library
//!
//! Serves the TIMS landing page and research catalog, and exposes a signed
//! webhook that launches the deployment script.

pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;
pub mod webhook;


use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    config::SiteConfig,
    content::Catalog,
    error::{SiteError, SiteResult},
    router::create_router,
    state::AppState,
    webhook::{ScriptLauncher, SignatureVerifier},
};

/// Build the shared state from configuration.
///
/// Loads the catalog and resolves the deployment script against the
/// installation directory.
pub fn build_state(config: &SiteConfig) -> SiteResult<AppState> {
    let catalog = Catalog::load()?;
    let install_dir = crate::config::install_dir()?;
    let script = config.deploy_script_in(&install_dir);

    info!(
        papers = catalog.len(),
        script = %script.display(),
        shell = %config.deploy_shell,
        "site state initialised"
    );

    Ok(AppState::new(
        catalog,
        SignatureVerifier::new(config.secret_copy()),
        ScriptLauncher::new(config.deploy_shell.clone(), script),
    ))
}

/// Run the website server.
pub async fn run(config: SiteConfig) -> SiteResult<()> {
    if config.uses_default_secret() {
        warn!(
            "WEBHOOK_SECRET is not set; using the insecure placeholder secret. \
             Never run this configuration in production"
        );
    }

    let state = build_state(&config)?;
    let app = create_router(state, &config.static_dir);

    let addr = config.bind_addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| SiteError::Bind { addr, source })?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(SiteError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}
