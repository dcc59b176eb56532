//! TIMS Taxonomy Website
//!
//! Research and marketing site for the TIMS learning framework.

use std::process::ExitCode;

use tims_site::config::{self, SiteConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tims_site=debug,tower_http=debug".parse().expect("valid filter")))
        .with(fmt::layer())
        .init();

    tracing::info!("Starting TIMS Taxonomy website server");

    config::load_dotenv();

    let result = match SiteConfig::from_env() {
        Ok(config) => tims_site::run(config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "site stopped");
            ExitCode::FAILURE
        }
    }
}
