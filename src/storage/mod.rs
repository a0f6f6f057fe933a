//! # Storage Layer
//!
//! Loads documentation sets and configuration from disk.
//!
//! ## File Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Manifest | TOML, YAML or JSON | `--docs`, `DOCNAV_DOCS`, or `docs` in project config |
//! | Section bodies | Markdown | inline `body`, or `file` relative to the manifest |
//! | Project config | TOML | `.docnav/config.toml` |
//! | Global config | TOML | `~/.config/docnav/config.toml` |
//!
//! ## Project Structure
//!
//! ```text
//! .docnav/
//! └── config.toml           # Project configuration
//! docs.toml                 # Starter manifest written by `docnav init`
//! docs/
//! └── introduction.md       # Section body referenced by the manifest
//! ```
//!
//! ## Key Types
//!
//! - [`DocSource`] - Resolves which manifest to load and builds the [`DocSet`](crate::domain::DocSet)
//! - [`Manifest`] - Serde model of a manifest file
//! - [`Project`] - Entry point for a docnav project
//! - [`Config`] - Project and global configuration

mod config;
mod manifest;
mod project;
mod source;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_DIR};
pub use manifest::{
    load_docset, Manifest, ManifestCategory, ManifestError, ManifestFormat, ManifestSection,
};
pub use project::{Project, ProjectError, STARTER_MANIFEST};
pub use source::DocSource;
