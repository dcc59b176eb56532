//! Router Configuration
//!
//! Route configuration for the website.

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Create the main router with all routes.
///
/// Files under `static_dir` are served at `/static`. Asset URLs carry a
/// `?v=` build version, so they can be cached indefinitely.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let static_service = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::header::CACHE_CONTROL,
            axum::http::HeaderValue::from_static("public, max-age=31536000, immutable"),
        ))
        .service(ServeDir::new(static_dir));

    Router::new()
        .route("/", get(handlers::home::home))
        .route("/research", get(handlers::research::research_index))
        .route("/research/{slug}", get(handlers::research::research_paper))
        .route("/webhook/deploy", post(handlers::webhook::deploy))
        .nest_service("/static", static_service)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
