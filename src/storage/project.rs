//! Project management
//!
//! Handles project initialization and gives access to the project's config
//! and documentation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::{Config, PROJECT_DIR};
use super::source::DocSource;

/// Manifest written by `init`, relative to the project root
pub const STARTER_MANIFEST: &str = "docs.toml";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a docnav project. Run 'docnav init' first.")]
    NotInProject,
}

/// A docnav project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Initializes a new project at the given path
    ///
    /// Existing files are left alone, so running it twice is harmless.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let project_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&project_dir).with_context(|| {
            format!(
                "Failed to create {} directory: {}",
                PROJECT_DIR,
                project_dir.display()
            )
        })?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = format!(
                r#"# docnav configuration

# Manifest to load, relative to the project root
docs = "{STARTER_MANIFEST}"

# Section shown when no fragment is given (defaults to the manifest's)
# default_section = "introduction"

# Expand a section's category when it is selected
auto_expand = false

# Categories expanded on startup
expanded = []

# Reload the viewer when the manifest changes
watch = false
"#
            );
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let manifest_path = root.join(STARTER_MANIFEST);
        if !manifest_path.exists() {
            fs::write(&manifest_path, STARTER_DOCS).with_context(|| {
                format!("Failed to write manifest: {}", manifest_path.display())
            })?;
        }

        let intro_path = root.join("docs").join("introduction.md");
        if !intro_path.exists() {
            if let Some(dir) = intro_path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
            fs::write(&intro_path, STARTER_INTRO)
                .with_context(|| format!("Failed to write {}", intro_path.display()))?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .docnav directory path
    pub fn docnav_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Manifest this project points at
    pub fn doc_source(&self) -> DocSource {
        DocSource::resolve(None, &self.config)
    }
}

const STARTER_DOCS: &str = r#"title = "Project Docs"

[[categories]]
title = "Getting Started"
expanded = true

[[categories.sections]]
id = "introduction"
title = "Introduction"
description = "What this project does"
file = "docs/introduction.md"

[[categories.sections]]
id = "usage"
title = "Usage"
description = "Run it for the first time"
body = """
Describe the first command a new user should run:

```bash
your-tool --help
```
"""
"#;

const STARTER_INTRO: &str = "# Welcome\n\nReplace this page with an overview of your project.\n";
