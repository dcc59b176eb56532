//! Askama Templates
//!
//! Template structs for rendering HTML pages.

use askama::Template;
use askama_web::WebTemplate;

use crate::content::{ResearchPaper, Section};

/// Build identifier appended to static asset URLs for cache busting.
pub const ASSET_VERSION: &str = env!("BUILD_VERSION");

/// Display format for paper dates, e.g. "March 15, 2015".
const DATE_FORMAT: &str = "%B %d, %Y";

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "tims.html")]
pub struct HomeTemplate {
    pub title: String,
    pub asset_version: &'static str,
}

impl HomeTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            asset_version: ASSET_VERSION,
        }
    }
}

/// Research list page template.
#[derive(Template, WebTemplate)]
#[template(path = "research/index.html")]
pub struct ResearchListTemplate {
    pub title: String,
    pub asset_version: &'static str,
    pub papers: Vec<PaperSummary>,
}

impl ResearchListTemplate {
    pub fn new(title: impl Into<String>, papers: Vec<PaperSummary>) -> Self {
        Self {
            title: title.into(),
            asset_version: ASSET_VERSION,
            papers,
        }
    }
}

/// Summary of a paper for listing.
pub struct PaperSummary {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub thumbnail: String,
    pub excerpt: String,
}

impl From<&ResearchPaper> for PaperSummary {
    fn from(p: &ResearchPaper) -> Self {
        Self {
            slug: p.slug.clone(),
            title: p.title.clone(),
            author: p.author.clone(),
            date: p.date.format(DATE_FORMAT).to_string(),
            category: p.category.clone(),
            thumbnail: p.thumbnail.clone(),
            excerpt: p.excerpt.clone(),
        }
    }
}

/// Individual research paper template.
#[derive(Template, WebTemplate)]
#[template(path = "research/detail.html")]
pub struct ResearchDetailTemplate {
    pub title: String,
    pub asset_version: &'static str,
    pub paper_title: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub abstract_text: String,
    pub sections: Vec<Section>,
    pub images: Vec<String>,
    pub citations: u32,
    pub downloads: u32,
}

impl ResearchDetailTemplate {
    pub fn new(title: impl Into<String>, paper: &ResearchPaper) -> Self {
        Self {
            title: title.into(),
            asset_version: ASSET_VERSION,
            paper_title: paper.title.clone(),
            author: paper.author.clone(),
            date: paper.date.format(DATE_FORMAT).to_string(),
            category: paper.category.clone(),
            abstract_text: paper.content.abstract_text.clone(),
            sections: paper.content.sections.clone(),
            images: paper.content.images.clone(),
            citations: paper.content.citations,
            downloads: paper.content.downloads,
        }
    }
}
