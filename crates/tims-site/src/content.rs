//! Research Catalog
//!
//! The research paper dataset is compiled into the binary and parsed once at
//! startup. It is never mutated afterwards.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Dataset shipped with the site.
const RESEARCH_JSON: &str = include_str!("../content/research.json");

/// A research paper with metadata and body.
#[derive(Clone, Debug, Deserialize)]
pub struct ResearchPaper {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub date: NaiveDate,
    pub category: String,
    pub thumbnail: String,
    pub excerpt: String,
    pub content: PaperContent,
}

/// Body of a research paper.
#[derive(Clone, Debug, Deserialize)]
pub struct PaperContent {
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub sections: Vec<Section>,
    pub images: Vec<String>,
    pub citations: u32,
    pub downloads: u32,
}

/// A headed section of a paper.
#[derive(Clone, Debug, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: String,
}

/// Errors raised while building the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset is not valid JSON for the paper schema.
    #[error("failed to parse research catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two papers share a slug.
    #[error("duplicate research slug: {0}")]
    DuplicateSlug(String),

    /// Two papers share an id.
    #[error("duplicate research id: {0}")]
    DuplicateId(u32),

    /// A slug contains characters that are not URL-safe.
    #[error("slug is not URL-safe: {0:?}")]
    InvalidSlug(String),
}

/// Immutable store of research papers.
///
/// Keeps insertion order for the list view and an index for slug lookup.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    papers: Vec<ResearchPaper>,
    by_slug: HashMap<String, usize>,
}

impl Catalog {
    /// Load the dataset compiled into the binary.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(RESEARCH_JSON)
    }

    /// Parse a catalog from a JSON array of papers.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let papers: Vec<ResearchPaper> = serde_json::from_str(json)?;
        Self::from_papers(papers)
    }

    /// Build a catalog, checking slug and id uniqueness.
    pub fn from_papers(papers: Vec<ResearchPaper>) -> Result<Self, CatalogError> {
        let mut by_slug = HashMap::with_capacity(papers.len());
        let mut ids = Vec::with_capacity(papers.len());

        for (index, paper) in papers.iter().enumerate() {
            if !is_url_safe(&paper.slug) {
                return Err(CatalogError::InvalidSlug(paper.slug.clone()));
            }
            if ids.contains(&paper.id) {
                return Err(CatalogError::DuplicateId(paper.id));
            }
            ids.push(paper.id);
            if by_slug.insert(paper.slug.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSlug(paper.slug.clone()));
            }
        }

        tracing::debug!(papers = papers.len(), "research catalog loaded");

        Ok(Self { papers, by_slug })
    }

    /// All papers in catalog order.
    pub fn papers(&self) -> &[ResearchPaper] {
        &self.papers
    }

    /// Get a single paper by slug.
    pub fn paper(&self, slug: &str) -> Option<&ResearchPaper> {
        self.by_slug.get(slug).map(|&index| &self.papers[index])
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

/// Lowercase ASCII letters, digits, and hyphens; non-empty.
fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: u32, slug: &str) -> ResearchPaper {
        ResearchPaper {
            id,
            slug: slug.to_string(),
            title: format!("Paper {id}"),
            author: "Author".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            category: "Category".to_string(),
            thumbnail: "static/images/x.jpg".to_string(),
            excerpt: "Excerpt".to_string(),
            content: PaperContent {
                abstract_text: "Abstract".to_string(),
                sections: vec![],
                images: vec![],
                citations: 0,
                downloads: 0,
            },
        }
    }

    #[test]
    fn builtin_catalog_loads_in_order() {
        let catalog = Catalog::load().unwrap();
        let slugs: Vec<&str> = catalog.papers().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(
            slugs,
            [
                "tims-taxonomy-introduction-2015",
                "cognitive-patterns-modern-education",
                "technology-integration-tims-framework",
                "assessment-tools-tims-taxonomy",
            ]
        );
    }

    #[test]
    fn builtin_catalog_fields() {
        let catalog = Catalog::load().unwrap();
        let paper = catalog.paper("cognitive-patterns-modern-education").unwrap();
        assert_eq!(paper.id, 2);
        assert_eq!(paper.author, "Dr. Sarah Mitchell");
        assert_eq!(paper.date, NaiveDate::from_ymd_opt(2018, 9, 22).unwrap());
        assert_eq!(paper.content.sections.len(), 2);
        assert_eq!(paper.content.sections[1].heading, "Key Findings");
        assert_eq!(paper.content.citations, 42);
        assert_eq!(paper.content.downloads, 5680);
    }

    #[test]
    fn lookup_miss_returns_none() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.paper("no-such-paper").is_none());
        assert!(catalog.paper("").is_none());
    }

    #[test]
    fn rejects_duplicate_slug() {
        let err = Catalog::from_papers(vec![paper(1, "a"), paper(2, "a")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(s) if s == "a"));
    }

    #[test]
    fn rejects_duplicate_id() {
        let err = Catalog::from_papers(vec![paper(7, "a"), paper(7, "b")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(7)));
    }

    #[test]
    fn rejects_unsafe_slug() {
        for slug in ["", "Has-Caps", "with space", "a/b", "ümlaut"] {
            let err = Catalog::from_papers(vec![paper(1, slug)]).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidSlug(_)), "{slug:?}");
        }
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json("[{\"id\": 1}]"),
            Err(CatalogError::Parse(_))
        ));
    }
}
