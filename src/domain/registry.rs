//! Section registry
//!
//! The static, ordered catalog of categories and their sections. Built once
//! when a doc set is loaded and never mutated afterwards. Construction
//! validates the cross-category invariants, so every other component can
//! assume section IDs are unique and the default section exists.

use std::collections::HashMap;
use thiserror::Error;

use super::section::{Category, CategoryId, Section, SectionId};

/// Fallback section used when a doc set does not name a default
pub const INTRODUCTION_ID: &str = "introduction";

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Documentation set has no sections")]
    Empty,

    #[error("Duplicate section ID '{id}' in categories '{first}' and '{second}'")]
    DuplicateSection {
        id: SectionId,
        first: String,
        second: String,
    },

    #[error("Duplicate category ID: {0}")]
    DuplicateCategory(CategoryId),

    #[error("Default section '{0}' is not defined in any category")]
    UnknownDefault(SectionId),
}

/// Handle to a section known to the registry
///
/// Only [`SectionRegistry`] hands these out, so any lookup keyed by a
/// `SectionKey` is total over the registry's sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionKey(usize);

impl SectionKey {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    category: usize,
    item: usize,
}

/// Read-only catalog of categories and sections
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    categories: Vec<Category>,
    /// Flattened (category, item) positions in display order
    slots: Vec<Slot>,
    /// Section ID -> position in `slots`
    by_id: HashMap<String, usize>,
    default: SectionKey,
}

impl SectionRegistry {
    /// Builds a registry, validating ID uniqueness and the default section
    ///
    /// When `default_id` is `None` the `introduction` section is used if it
    /// exists, otherwise the first section in display order.
    pub fn new(
        categories: Vec<Category>,
        default_id: Option<SectionId>,
    ) -> Result<Self, RegistryError> {
        let mut slots: Vec<Slot> = Vec::new();
        let mut by_id: HashMap<String, usize> = HashMap::new();
        let mut category_ids: HashMap<&CategoryId, usize> = HashMap::new();

        for (category_idx, category) in categories.iter().enumerate() {
            if category_ids.insert(&category.id, category_idx).is_some() {
                return Err(RegistryError::DuplicateCategory(category.id.clone()));
            }

            for (item_idx, section) in category.items.iter().enumerate() {
                if let Some(existing) = by_id.get(section.id.as_str()) {
                    let first = &categories[slots[*existing].category];
                    return Err(RegistryError::DuplicateSection {
                        id: section.id.clone(),
                        first: first.title.clone(),
                        second: category.title.clone(),
                    });
                }
                by_id.insert(section.id.as_str().to_string(), slots.len());
                slots.push(Slot {
                    category: category_idx,
                    item: item_idx,
                });
            }
        }

        if slots.is_empty() {
            return Err(RegistryError::Empty);
        }

        let default = match default_id {
            Some(id) => by_id
                .get(id.as_str())
                .copied()
                .ok_or(RegistryError::UnknownDefault(id))?,
            None => by_id.get(INTRODUCTION_ID).copied().unwrap_or(0),
        };

        Ok(Self {
            categories,
            slots,
            by_id,
            default: SectionKey(default),
        })
    }

    /// Categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All sections in display order, category by category
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.slots.iter().map(|slot| self.slot_section(*slot))
    }

    /// Sections paired with their owning category, in display order
    pub fn sections_with_category(&self) -> impl Iterator<Item = (&Category, &Section)> + '_ {
        self.slots.iter().map(|slot| {
            let category = &self.categories[slot.category];
            (category, &category.items[slot.item])
        })
    }

    /// Number of sections across all categories
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false for a successfully built registry
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Looks up a section by ID
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.lookup(id).map(|key| self.section(key))
    }

    /// Returns the key for a known section ID
    pub fn lookup(&self, id: &str) -> Option<SectionKey> {
        self.by_id.get(id).copied().map(SectionKey)
    }

    /// Returns the key for `id`, falling back to the default section
    pub fn resolve(&self, id: &str) -> SectionKey {
        self.lookup(id).unwrap_or(self.default)
    }

    /// Section for a registry-issued key
    pub fn section(&self, key: SectionKey) -> &Section {
        self.slot_section(self.slots[key.0])
    }

    /// Owning category of a section
    pub fn category_of(&self, id: &str) -> Option<&Category> {
        self.lookup(id)
            .map(|key| &self.categories[self.slots[key.0].category])
    }

    /// Looks up a category by ID
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id.as_str() == id)
    }

    pub fn default_key(&self) -> SectionKey {
        self.default
    }

    pub fn default_id(&self) -> &SectionId {
        &self.section(self.default).id
    }

    fn slot_section(&self, slot: Slot) -> &Section {
        &self.categories[slot.category].items[slot.item]
    }
}
