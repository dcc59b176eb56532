//! Home Page Handler

use axum::response::IntoResponse;

use crate::templates::HomeTemplate;

/// Handler for the TIMS Taxonomy landing page.
pub async fn home() -> impl IntoResponse {
    HomeTemplate::new("TIMS Taxonomy")
}
