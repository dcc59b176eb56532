//! Research Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    state::AppState,
    templates::{PaperSummary, ResearchDetailTemplate, ResearchListTemplate},
};

/// Body returned when no paper matches a slug.
pub const NOT_FOUND_BODY: &str = "Research paper not found";

/// Handler for the research index page.
pub async fn research_index(State(state): State<AppState>) -> impl IntoResponse {
    let papers: Vec<PaperSummary> = state.catalog().papers().iter().map(PaperSummary::from).collect();

    ResearchListTemplate::new("Research - TIMS Taxonomy", papers)
}

/// Handler for individual research papers.
pub async fn research_paper(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, &'static str)> {
    let paper = state
        .catalog()
        .paper(&slug)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND_BODY))?;

    Ok(ResearchDetailTemplate::new(
        format!("{} - TIMS Taxonomy", paper.title),
        paper,
    ))
}
