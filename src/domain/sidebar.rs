//! Sidebar expand/collapse state
//!
//! Purely presentational: which categories show their sections. Nothing here
//! reads or writes the active section.

use std::collections::HashMap;

use super::registry::SectionRegistry;
use super::section::{CategoryId, SectionId};

/// One visible row of the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRow {
    Category {
        id: CategoryId,
        title: String,
        expanded: bool,
        sections: usize,
    },
    Section {
        id: SectionId,
        title: String,
        category: CategoryId,
    },
}

impl SidebarRow {
    pub fn section_id(&self) -> Option<&SectionId> {
        match self {
            SidebarRow::Section { id, .. } => Some(id),
            SidebarRow::Category { .. } => None,
        }
    }

    pub fn category_id(&self) -> &CategoryId {
        match self {
            SidebarRow::Category { id, .. } => id,
            SidebarRow::Section { category, .. } => category,
        }
    }
}

/// Expanded/collapsed flag per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarState {
    expanded: HashMap<CategoryId, bool>,
}

impl SidebarState {
    /// Starts with every category collapsed except `expanded`
    ///
    /// IDs in `expanded` that the registry doesn't know are ignored.
    pub fn new<'a>(
        registry: &SectionRegistry,
        expanded: impl IntoIterator<Item = &'a CategoryId>,
    ) -> Self {
        let mut state: HashMap<CategoryId, bool> = registry
            .categories()
            .iter()
            .map(|c| (c.id.clone(), false))
            .collect();

        for id in expanded {
            if let Some(flag) = state.get_mut(id) {
                *flag = true;
            }
        }

        Self { expanded: state }
    }

    /// Flips one category; returns the new state, or `None` if unknown
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let flag = self
            .expanded
            .iter_mut()
            .find(|(key, _)| key.as_str() == id)
            .map(|(_, flag)| flag)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Expands one category; returns false if unknown
    pub fn expand(&mut self, id: &CategoryId) -> bool {
        match self.expanded.get_mut(id) {
            Some(flag) => {
                *flag = true;
                true
            }
            None => false,
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded.values_mut().for_each(|flag| *flag = true);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.values_mut().for_each(|flag| *flag = false);
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded
            .iter()
            .any(|(key, flag)| key.as_str() == id && *flag)
    }

    /// Category IDs currently expanded
    pub fn expanded_ids(&self) -> Vec<CategoryId> {
        let mut ids: Vec<_> = self
            .expanded
            .iter()
            .filter(|(_, flag)| **flag)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Rows to draw: every category header, plus sections of expanded ones
    pub fn visible_rows(&self, registry: &SectionRegistry) -> Vec<SidebarRow> {
        let mut rows = Vec::new();

        for category in registry.categories() {
            let expanded = self.expanded.get(&category.id).copied().unwrap_or(false);
            rows.push(SidebarRow::Category {
                id: category.id.clone(),
                title: category.title.clone(),
                expanded,
                sections: category.items.len(),
            });

            if expanded {
                rows.extend(category.items.iter().map(|section| SidebarRow::Section {
                    id: section.id.clone(),
                    title: section.title.clone(),
                    category: category.id.clone(),
                }));
            }
        }

        rows
    }
}
