//! Where a documentation set comes from
//!
//! The manifest is picked from, in order: the `--docs` flag (or
//! `DOCNAV_DOCS`), the project config's `docs` key, and finally the docs
//! compiled into the binary.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::config::{Config, ProjectConfig};
use super::manifest::{Manifest, ManifestFormat};
use crate::domain::{CategoryId, DocSet};

const BUILTIN_MANIFEST: &str = include_str!("builtin_docs.toml");

/// Manifest location for a doc set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocSource {
    /// A manifest file on disk
    Manifest(PathBuf),
    /// Docs shipped with the binary
    Builtin,
}

impl DocSource {
    /// Picks the manifest to load given an explicit path and the config
    pub fn resolve(explicit: Option<&Path>, config: &Config) -> Self {
        if let Some(path) = explicit {
            return DocSource::Manifest(path.to_path_buf());
        }

        match config.project_docs() {
            Some(path) => DocSource::Manifest(path),
            None => DocSource::Builtin,
        }
    }

    /// Manifest path, if the docs come from disk
    pub fn path(&self) -> Option<&Path> {
        match self {
            DocSource::Manifest(path) => Some(path),
            DocSource::Builtin => None,
        }
    }

    /// Parses the manifest without resolving bodies
    pub fn manifest(&self) -> Result<Manifest> {
        match self {
            DocSource::Manifest(path) => Manifest::load(path)
                .with_context(|| format!("Failed to load manifest: {}", path.display())),
            DocSource::Builtin => Manifest::parse(BUILTIN_MANIFEST, ManifestFormat::Toml)
                .context("Built-in documentation is invalid"),
        }
    }

    /// Files whose changes affect the doc set: the manifest and its section files
    pub fn watch_files(&self) -> Result<Vec<PathBuf>> {
        let path = match self {
            DocSource::Manifest(path) => path,
            DocSource::Builtin => return Ok(vec![]),
        };

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut files = vec![path.clone()];
        for category in self.manifest()?.categories {
            files.extend(
                category
                    .sections
                    .into_iter()
                    .filter_map(|section| section.file)
                    .map(|file| base_dir.join(file)),
            );
        }
        Ok(files)
    }

    /// Loads and validates the doc set, applying project overrides
    pub fn load(&self, project: &ProjectConfig) -> Result<DocSet> {
        let mut manifest = self.manifest()?;
        apply_overrides(&mut manifest, project)?;

        let base_dir = self.path().and_then(Path::parent);
        manifest
            .into_docset(base_dir)
            .with_context(|| format!("Failed to build documentation from {}", self))
    }
}

impl fmt::Display for DocSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocSource::Manifest(path) => write!(f, "{}", path.display()),
            DocSource::Builtin => write!(f, "built-in docs"),
        }
    }
}

fn apply_overrides(manifest: &mut Manifest, project: &ProjectConfig) -> Result<()> {
    if let Some(default) = &project.default_section {
        manifest.default = Some(default.clone());
    }

    for wanted in &project.expanded {
        let mut found = false;
        for category in &mut manifest.categories {
            let id = match &category.id {
                Some(id) => id.clone(),
                None => CategoryId::from_title(&category.title)?,
            };
            if &id == wanted {
                category.expanded = true;
                found = true;
            }
        }
        if !found {
            bail!("Unknown category '{}' in project config 'expanded'", wanted);
        }
    }

    Ok(())
}
