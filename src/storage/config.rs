//! Configuration handling for docnav
//!
//! Configuration is stored in `.docnav/config.toml` (project) and
//! `~/.config/docnav/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CategoryId, ControllerOptions, SectionId};

/// Name of the per-project directory
pub const PROJECT_DIR: &str = ".docnav";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Manifest path, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<PathBuf>,

    /// Overrides the manifest's default section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_section: Option<SectionId>,

    /// Expand a section's category when it is selected
    pub auto_expand: bool,

    /// Categories expanded on startup, in addition to the manifest's
    pub expanded: Vec<CategoryId>,

    /// Reload the viewer when the manifest changes
    pub watch: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            docs: None,
            default_section: None,
            auto_expand: false,
            expanded: vec![],
            watch: false,
        }
    }
}

impl ProjectConfig {
    /// Navigation options for a controller started in this project
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            auto_expand: self.auto_expand,
            expanded: self.expanded.clone(),
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Viewer tick interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            tick_rate_ms: 250,
        }
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "docnav", "docnav").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        parse_global(&content).context("Failed to parse global config")
    }

    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        match Self::find_project_root() {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        parse_project(&content).context("Failed to parse project config")
    }

    /// Finds the project root by looking for `.docnav/` from the current directory up
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Finds the project root by looking for `.docnav/` from `start` up
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Manifest configured for this project, resolved against the root
    pub fn project_docs(&self) -> Option<PathBuf> {
        let docs = self.project.docs.as_ref()?;
        Some(match &self.project_root {
            Some(root) if docs.is_relative() => root.join(docs),
            _ => docs.clone(),
        })
    }
}

fn parse_project(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if let Some(docs) = &config.docs {
        if docs.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("'docs' must not be empty".to_string()));
        }
    }

    Ok(config)
}

fn parse_global(content: &str) -> Result<GlobalConfig, ConfigError> {
    let config: GlobalConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if config.tick_rate_ms == 0 {
        return Err(ConfigError::Invalid(
            "'tick_rate_ms' must be greater than zero".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert!(!config.project.auto_expand);
        assert_eq!(config.global.default_format, OutputFormat::Text);
        assert_eq!(config.global.tick_rate_ms, 250);
        assert_eq!(config.project_root, None);
        assert_eq!(config.project_docs(), None);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
docs = "docs/manual.toml"
default_section = "installation"
auto_expand = true
expanded = ["guides"]
"#;

        let config = parse_project(toml).unwrap();
        assert_eq!(config.docs, Some(PathBuf::from("docs/manual.toml")));
        assert_eq!(config.default_section.as_ref().unwrap().as_str(), "installation");
        assert!(config.auto_expand);
        assert_eq!(config.expanded.len(), 1);
        assert!(!config.watch);

        let options = config.controller_options();
        assert!(options.auto_expand);
        assert_eq!(options.expanded, config.expanded);
    }

    #[test]
    fn project_config_rejects_bad_section_id() {
        let err = parse_project(r#"default_section = "has space""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
tick_rate_ms = 100
"#;

        let config = parse_global(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn global_config_rejects_zero_tick() {
        let err = parse_global("tick_rate_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn find_project_root_from_subdir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_project_root_from(&sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn project_docs_relative_to_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();
        fs::write(
            dir.path().join(PROJECT_DIR).join("config.toml"),
            "docs = \"docs.toml\"\n",
        )
        .unwrap();

        let config = Config::for_project(dir.path()).unwrap();
        assert_eq!(config.project_docs(), Some(dir.path().join("docs.toml")));
    }
}
