//! Documentation manifests
//!
//! A manifest lists categories in display order, each with its sections.
//! Section bodies are markdown, either inline (`body`) or in a file next to
//! the manifest (`file`).
//!
//! ```toml
//! title = "Relay"
//! default = "introduction"
//!
//! [[categories]]
//! title = "Getting Started"
//! expanded = true
//!
//! [[categories.sections]]
//! id = "introduction"
//! title = "Introduction"
//! description = "What Relay is for"
//! file = "intro.md"
//! ```
//!
//! The same structure is accepted as YAML (`.yaml`, `.yml`) or JSON (`.json`).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Category, CategoryId, DocSet, DocSetError, IdError, Section, SectionId};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported manifest format '{0}' (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("Failed to parse TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Section '{0}' needs either 'body' or 'file'")]
    MissingBody(SectionId),

    #[error("Section '{0}' sets both 'body' and 'file'")]
    AmbiguousBody(SectionId),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error("Invalid documentation set: {0}")]
    Invalid(#[from] DocSetError),
}

/// Serialization format of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Picks the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match ext.as_str() {
            "toml" => Ok(ManifestFormat::Toml),
            "yaml" | "yml" => Ok(ManifestFormat::Yaml),
            "json" => Ok(ManifestFormat::Json),
            _ => Err(ManifestError::UnsupportedFormat(ext)),
        }
    }
}

/// A section entry in a manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSection {
    pub id: SectionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// A category entry in a manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestCategory {
    /// Derived from the title when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub title: String,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub sections: Vec<ManifestSection>,
}

/// On-disk description of a documentation set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<SectionId>,
    #[serde(default)]
    pub categories: Vec<ManifestCategory>,
}

fn default_title() -> String {
    "Documentation".to_string()
}

impl Manifest {
    /// Parses manifest text in the given format
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self, ManifestError> {
        Ok(match format {
            ManifestFormat::Toml => toml::from_str(content)?,
            ManifestFormat::Yaml => serde_yaml::from_str(content)?,
            ManifestFormat::Json => serde_json::from_str(content)?,
        })
    }

    /// Reads and parses a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let format = ManifestFormat::from_path(path)?;
        let content = read(path)?;
        Self::parse(&content, format)
    }

    /// Total number of sections across categories
    pub fn section_count(&self) -> usize {
        self.categories.iter().map(|c| c.sections.len()).sum()
    }

    /// Resolves bodies and builds the validated doc set
    ///
    /// `file` entries are resolved against `base_dir`; a manifest without a
    /// base directory can only use inline bodies.
    pub fn into_docset(self, base_dir: Option<&Path>) -> Result<DocSet, ManifestError> {
        let mut categories = Vec::with_capacity(self.categories.len());
        let mut bodies = HashMap::new();
        let mut expanded = Vec::new();

        for category in self.categories {
            let id = match category.id {
                Some(id) => id,
                None => CategoryId::from_title(&category.title)?,
            };
            if category.expanded {
                expanded.push(id.clone());
            }

            let mut items = Vec::with_capacity(category.sections.len());
            for entry in category.sections {
                let body = match (entry.body, entry.file) {
                    (Some(_), Some(_)) => return Err(ManifestError::AmbiguousBody(entry.id)),
                    (Some(body), None) => body,
                    (None, Some(file)) => {
                        let path = match base_dir {
                            Some(dir) => dir.join(file),
                            None => file,
                        };
                        read(&path)?
                    }
                    (None, None) => return Err(ManifestError::MissingBody(entry.id)),
                };

                // Duplicates are reported by the registry, which knows both categories
                bodies.entry(entry.id.clone()).or_insert(body);
                items.push(Section::new(entry.id, entry.title, entry.description));
            }

            categories.push(Category::with_id(id, category.title, items));
        }

        Ok(DocSet::new(
            self.title,
            categories,
            self.default,
            bodies,
            expanded,
        )?)
    }
}

/// Loads a manifest file and builds its doc set
pub fn load_docset(path: &Path) -> Result<DocSet, ManifestError> {
    let manifest = Manifest::load(path)?;
    manifest.into_docset(path.parent())
}

fn read(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegistryError;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
title = "Relay"

[[categories]]
title = "Getting Started"
expanded = true

[[categories.sections]]
id = "introduction"
title = "Introduction"
description = "What Relay is for"
body = "Relay moves messages."

[[categories.sections]]
id = "installation"
title = "Installation"
file = "install.md"

[[categories]]
id = "guides"
title = "Guides & Recipes"

[[categories.sections]]
id = "configuration"
title = "Configuration"
body = "Set the port."
"#;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("docs.toml")).unwrap(),
            ManifestFormat::Toml
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("docs.YML")).unwrap(),
            ManifestFormat::Yaml
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("docs.json")).unwrap(),
            ManifestFormat::Json
        );
        assert!(matches!(
            ManifestFormat::from_path(Path::new("docs.md")),
            Err(ManifestError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn parse_toml_manifest() {
        let manifest = Manifest::parse(SAMPLE, ManifestFormat::Toml).unwrap();
        assert_eq!(manifest.title, "Relay");
        assert_eq!(manifest.categories.len(), 2);
        assert_eq!(manifest.section_count(), 3);
        assert!(manifest.categories[0].expanded);
        assert_eq!(manifest.categories[1].id.as_ref().unwrap().as_str(), "guides");
    }

    #[test]
    fn load_resolves_files_relative_to_manifest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("docs.toml"), SAMPLE).unwrap();
        fs::write(dir.path().join("install.md"), "Run `relay serve`.").unwrap();

        let docs = load_docset(&dir.path().join("docs.toml")).unwrap();

        assert_eq!(docs.registry().len(), 3);
        assert_eq!(docs.registry().default_id().as_str(), "introduction");
        assert_eq!(
            docs.render("installation").to_string(),
            "Installation\n============\n\nRun `relay serve`.\n"
        );
        assert_eq!(docs.expanded_defaults().len(), 1);
        assert_eq!(
            docs.registry().category_of("configuration").unwrap().title,
            "Guides & Recipes"
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("docs.toml"), SAMPLE).unwrap();

        let err = load_docset(&dir.path().join("docs.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
        assert!(err.to_string().contains("install.md"));
    }

    #[test]
    fn parse_yaml_manifest() {
        let yaml = r#"
title: Fingerprint
default: hashing
categories:
  - title: Library
    sections:
      - id: overview
        title: Overview
        body: Fingerprints for content.
      - id: hashing
        title: Hashing
        description: How shingles are hashed
        body: "We hash *shingles*."
"#;
        let docs = Manifest::parse(yaml, ManifestFormat::Yaml)
            .unwrap()
            .into_docset(None)
            .unwrap();
        assert_eq!(docs.title(), "Fingerprint");
        assert_eq!(docs.registry().default_id().as_str(), "hashing");
    }

    #[test]
    fn parse_json_manifest() {
        let json = r#"{
            "categories": [
                {"title": "Campaigns", "sections": [
                    {"id": "send", "title": "Sending", "body": "Use `mailer send`."}
                ]}
            ]
        }"#;
        let docs = Manifest::parse(json, ManifestFormat::Json)
            .unwrap()
            .into_docset(None)
            .unwrap();
        assert_eq!(docs.title(), "Documentation");
        assert_eq!(docs.registry().categories()[0].id.as_str(), "campaigns");
    }

    #[test]
    fn section_without_body_rejected() {
        let toml = r#"
[[categories]]
title = "A"
[[categories.sections]]
id = "x"
title = "X"
"#;
        let err = Manifest::parse(toml, ManifestFormat::Toml)
            .unwrap()
            .into_docset(None)
            .unwrap_err();
        assert!(matches!(err, ManifestError::MissingBody(_)));
    }

    #[test]
    fn section_with_body_and_file_rejected() {
        let toml = r#"
[[categories]]
title = "A"
[[categories.sections]]
id = "x"
title = "X"
body = "inline"
file = "x.md"
"#;
        let err = Manifest::parse(toml, ManifestFormat::Toml)
            .unwrap()
            .into_docset(None)
            .unwrap_err();
        assert!(matches!(err, ManifestError::AmbiguousBody(_)));
    }

    #[test]
    fn duplicate_ids_rejected_by_registry() {
        let toml = r#"
[[categories]]
title = "A"
[[categories.sections]]
id = "x"
title = "X"
body = "one"

[[categories]]
title = "B"
[[categories.sections]]
id = "x"
title = "X again"
body = "two"
"#;
        let err = Manifest::parse(toml, ManifestFormat::Toml)
            .unwrap()
            .into_docset(None)
            .unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Invalid(DocSetError::Registry(RegistryError::DuplicateSection { .. }))
        ));
    }

    #[test]
    fn invalid_section_id_rejected_at_parse() {
        let toml = r#"
[[categories]]
title = "A"
[[categories.sections]]
id = "two words"
title = "X"
body = "b"
"#;
        assert!(Manifest::parse(toml, ManifestFormat::Toml).is_err());
    }
}
