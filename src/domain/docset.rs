//! A loaded documentation set
//!
//! Bundles the immutable pieces derived at load time: the registry, the
//! parsed content and the search index, plus the categories the manifest
//! wants expanded on startup.

use std::collections::HashMap;

use thiserror::Error;

use super::content::{ContentBlock, ContentError, ContentLibrary};
use super::registry::{RegistryError, SectionRegistry};
use super::search::{SearchIndex, SearchOutcome};
use super::section::{Category, CategoryId, SectionId};

#[derive(Debug, Error, PartialEq)]
pub enum DocSetError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Unknown category '{0}' in expanded defaults")]
    UnknownCategory(CategoryId),
}

/// Registry, content and search index for one set of docs
#[derive(Debug, Clone)]
pub struct DocSet {
    title: String,
    registry: SectionRegistry,
    content: ContentLibrary,
    search: SearchIndex,
    expanded: Vec<CategoryId>,
}

impl DocSet {
    /// Validates and indexes a documentation set
    pub fn new(
        title: impl Into<String>,
        categories: Vec<Category>,
        default_id: Option<SectionId>,
        bodies: HashMap<SectionId, String>,
        expanded: Vec<CategoryId>,
    ) -> Result<Self, DocSetError> {
        let registry = SectionRegistry::new(categories, default_id)?;
        let content = ContentLibrary::new(&registry, bodies)?;
        let search = SearchIndex::build(&registry);

        if let Some(unknown) = expanded
            .iter()
            .find(|id| registry.category(id.as_str()).is_none())
        {
            return Err(DocSetError::UnknownCategory(unknown.clone()));
        }

        Ok(Self {
            title: title.into(),
            registry,
            content,
            search,
            expanded,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn search_index(&self) -> &SearchIndex {
        &self.search
    }

    /// Categories expanded when a sidebar is first shown
    pub fn expanded_defaults(&self) -> &[CategoryId] {
        &self.expanded
    }

    /// Content for `id`, or for the default section when `id` is unknown
    pub fn render(&self, id: &str) -> &ContentBlock {
        self.content.render(&self.registry, id)
    }

    pub fn query(&self, text: &str) -> SearchOutcome {
        self.search.query(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{sample_bodies, sample_categories, sample_docset};

    #[test]
    fn builds_all_parts() {
        let docs = sample_docset();
        assert_eq!(docs.title(), "Relay");
        assert_eq!(docs.registry().len(), 4);
        assert_eq!(docs.search_index().len(), 4);
        assert_eq!(docs.render("quick-start").title, "Quick Start");
        assert_eq!(docs.expanded_defaults().len(), 1);
    }

    #[test]
    fn unknown_expanded_category_rejected() {
        let result = DocSet::new(
            "Relay",
            sample_categories(),
            None,
            sample_bodies(),
            vec![CategoryId::from_title("Nope").unwrap()],
        );
        assert!(matches!(result, Err(DocSetError::UnknownCategory(_))));
    }

    #[test]
    fn registry_errors_propagate() {
        let result = DocSet::new("Empty", vec![], None, HashMap::new(), vec![]);
        assert_eq!(result.unwrap_err(), DocSetError::Registry(RegistryError::Empty));
    }
}
