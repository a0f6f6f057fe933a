//! Sections, categories and their identifiers
//!
//! ID Format:
//! - Section IDs: free-form tokens without whitespace or `#` (e.g., `quick-start`)
//! - Category IDs: lowercase slugs derived from the title (e.g., `getting-started`)
//!
//! Section IDs double as address fragment tokens, so `#quick-start` in a
//! location names the section `quick-start`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid section ID: must not be empty")]
    EmptySectionId,

    #[error("Invalid section ID '{0}': must not contain whitespace or '#'")]
    InvalidSectionId(String),

    #[error("Invalid category ID '{0}': must contain at least one letter or digit")]
    InvalidCategoryId(String),
}

/// Section ID, also used as the address fragment token
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

impl SectionId {
    /// Parses and validates a section ID
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::EmptySectionId);
        }
        if s.chars().any(|c| c.is_whitespace() || c == '#') {
            return Err(IdError::InvalidSectionId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SectionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SectionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Category ID, the key for sidebar expand state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    /// Derives a slug from a display title: `"Getting Started"` -> `getting-started`
    pub fn from_title(title: &str) -> Result<Self, IdError> {
        let mut slug = String::with_capacity(title.len());
        let mut pending_dash = false;

        for c in title.chars() {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }

        if slug.is_empty() {
            return Err(IdError::InvalidCategoryId(title.to_string()));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CategoryId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_title(s)
    }
}

impl TryFrom<String> for CategoryId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

/// One addressable unit of documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    /// One-line summary, shown in search results
    pub description: String,
}

impl Section {
    pub fn new(id: SectionId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A named, ordered group of sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    /// Display order is insertion order
    pub items: Vec<Section>,
}

impl Category {
    /// Creates a category with an ID derived from its title
    pub fn new(title: impl Into<String>, items: Vec<Section>) -> Result<Self, IdError> {
        let title = title.into();
        let id = CategoryId::from_title(&title)?;
        Ok(Self { id, title, items })
    }

    /// Creates a category with an explicit ID
    pub fn with_id(id: CategoryId, title: impl Into<String>, items: Vec<Section>) -> Self {
        Self {
            id,
            title: title.into(),
            items,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|s| s.id.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_id_parse_valid() {
        let id = SectionId::parse("quick-start").unwrap();
        assert_eq!(id.as_str(), "quick-start");
        assert_eq!(id.to_string(), "quick-start");
    }

    #[test]
    fn section_id_trims_whitespace() {
        let id = SectionId::parse("  installation ").unwrap();
        assert_eq!(id.as_str(), "installation");
    }

    #[test]
    fn section_id_rejects_empty() {
        assert_eq!(SectionId::parse(""), Err(IdError::EmptySectionId));
        assert_eq!(SectionId::parse("   "), Err(IdError::EmptySectionId));
    }

    #[test]
    fn section_id_rejects_hash_and_spaces() {
        assert!(matches!(
            SectionId::parse("#intro"),
            Err(IdError::InvalidSectionId(_))
        ));
        assert!(matches!(
            SectionId::parse("quick start"),
            Err(IdError::InvalidSectionId(_))
        ));
    }

    #[test]
    fn section_id_serde_roundtrip_validates() {
        let id: SectionId = serde_json::from_str("\"configuration\"").unwrap();
        assert_eq!(id.as_str(), "configuration");
        assert!(serde_json::from_str::<SectionId>("\"bad id\"").is_err());
    }

    #[test]
    fn category_id_from_title() {
        let id = CategoryId::from_title("Getting Started").unwrap();
        assert_eq!(id.as_str(), "getting-started");
    }

    #[test]
    fn category_id_collapses_punctuation() {
        let id = CategoryId::from_title("  API / Reference (v2) ").unwrap();
        assert_eq!(id.as_str(), "api-reference-v2");
    }

    #[test]
    fn category_id_rejects_symbols_only() {
        assert!(CategoryId::from_title("---").is_err());
    }

    #[test]
    fn category_contains_section() {
        let category = Category::new(
            "Guides",
            vec![Section::new(
                SectionId::parse("configuration").unwrap(),
                "Configuration",
                "Tune the broker",
            )],
        )
        .unwrap();

        assert_eq!(category.id.as_str(), "guides");
        assert!(category.contains("configuration"));
        assert!(!category.contains("installation"));
    }
}
