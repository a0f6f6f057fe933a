//! Search index over the section registry
//!
//! A flattened, filterable view of every section, decorated with its owning
//! category title. Matching is plain case-insensitive substring containment
//! over title, description and category title; results keep index order.

use serde::Serialize;

use super::registry::SectionRegistry;
use super::section::SectionId;

/// One searchable section, decorated with its category title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub id: SectionId,
    pub title: String,
    pub description: String,
    pub category: String,
}

impl SearchEntry {
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// Result of a query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// Blank query; search UI is suppressed
    #[default]
    Inactive,
    /// Matching entries in index order (possibly empty)
    Results(Vec<SearchEntry>),
}

impl SearchOutcome {
    pub fn is_active(&self) -> bool {
        matches!(self, SearchOutcome::Results(_))
    }

    /// Matching entries, empty when inactive
    pub fn entries(&self) -> &[SearchEntry] {
        match self {
            SearchOutcome::Inactive => &[],
            SearchOutcome::Results(entries) => entries,
        }
    }
}

/// Flattened index of all sections
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Flattens the registry, preserving category and section order
    pub fn build(registry: &SectionRegistry) -> Self {
        let entries = registry
            .sections_with_category()
            .map(|(category, section)| SearchEntry {
                id: section.id.clone(),
                title: section.title.clone(),
                description: section.description.clone(),
                category: category.title.clone(),
            })
            .collect();

        Self { entries }
    }

    /// Filters the index by a case-insensitive substring
    pub fn query(&self, text: &str) -> SearchOutcome {
        let needle = text.trim();
        if needle.is_empty() {
            return SearchOutcome::Inactive;
        }

        let needle = needle.to_lowercase();
        SearchOutcome::Results(
            self.entries
                .iter()
                .filter(|entry| entry.matches(&needle))
                .cloned()
                .collect(),
        )
    }

    /// All entries in index order
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
