//! Active-section router
//!
//! Tracks which section is displayed. Every transition degrades to the
//! default section instead of failing, so `active()` always names a section
//! that exists in the registry.

use super::location::Fragment;
use super::registry::SectionRegistry;
use super::section::SectionId;

/// Outcome of a router transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The active section changed
    Moved { from: SectionId, to: SectionId },
    /// The requested section was already active
    Unchanged,
    /// Unknown section ID; state left untouched
    Ignored,
}

impl Navigation {
    pub fn moved(&self) -> bool {
        matches!(self, Navigation::Moved { .. })
    }
}

/// Active-section state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    active: SectionId,
}

impl Router {
    /// Initial state from the address fragment read at load
    ///
    /// Deep links to known sections are honoured; anything else starts at
    /// the default section.
    pub fn initial(registry: &SectionRegistry, fragment: &Fragment) -> Self {
        let key = fragment
            .id()
            .and_then(|id| registry.lookup(id))
            .unwrap_or(registry.default_key());

        Self {
            active: registry.section(key).id.clone(),
        }
    }

    /// The active section ID
    pub fn active(&self) -> &SectionId {
        &self.active
    }

    /// Selects a section by ID; unknown IDs are ignored
    pub fn select(&mut self, registry: &SectionRegistry, id: &str) -> Navigation {
        match registry.get(id) {
            Some(section) => self.move_to(&section.id),
            None => Navigation::Ignored,
        }
    }

    /// Applies a fragment changed outside the router
    ///
    /// Empty and unknown fragments fall back to the default section.
    pub fn on_external_fragment_change(
        &mut self,
        registry: &SectionRegistry,
        fragment: &Fragment,
    ) -> Navigation {
        let key = fragment
            .id()
            .map(|id| registry.resolve(id))
            .unwrap_or(registry.default_key());

        self.move_to(&registry.section(key).id)
    }

    /// Re-validates the active section against a (reloaded) registry
    pub fn revalidate(&mut self, registry: &SectionRegistry) -> Navigation {
        if registry.contains(self.active.as_str()) {
            Navigation::Unchanged
        } else {
            self.move_to(registry.default_id())
        }
    }

    fn move_to(&mut self, id: &SectionId) -> Navigation {
        if &self.active == id {
            return Navigation::Unchanged;
        }
        let from = std::mem::replace(&mut self.active, id.clone());
        Navigation::Moved {
            from,
            to: id.clone(),
        }
    }
}
