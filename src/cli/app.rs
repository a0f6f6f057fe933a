//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{browse, tui};
use crate::storage::{Config, DocSource, Project};

#[derive(Parser)]
#[command(name = "docnav")]
#[command(author, version, about = "Browse product documentation from the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Manifest to load (.toml, .yaml, .yml or .json)
    #[arg(long, global = true, env = "DOCNAV_DOCS")]
    pub docs: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new docnav project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// List categories and sections
    List,

    /// Show a section's content
    Show {
        /// Section fragment or ID, e.g. '#installation' (defaults to the default section)
        fragment: Option<String>,
    },

    /// Search section titles, descriptions and categories
    Search {
        /// Search query (case-insensitive substring)
        query: String,
    },

    /// Validate the documentation manifest
    Check,

    /// Open the interactive viewer
    Tui {
        /// Fragment to open at, e.g. '#quick-start'
        #[arg(long)]
        fragment: Option<String>,

        /// Reload when the manifest changes
        #[arg(long)]
        watch: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("docnav starting");
    if let Some(root) = &config.project_root {
        output.verbose(&format!("Project root: {}", root.display()));
    }

    let source = DocSource::resolve(cli.docs.as_deref(), &config);

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created config at: {}", project.docnav_dir().display()),
            );
            output.success(&format!(
                "Initialized docnav project at {}",
                project.root().display()
            ));
        }

        Commands::List => browse::list(&output, &config, &source)?,

        Commands::Show { fragment } => {
            browse::show(&output, &config, &source, fragment.as_deref())?
        }

        Commands::Search { query } => browse::search(&output, &config, &source, &query)?,

        Commands::Check => browse::check(&output, &config, &source)?,

        Commands::Tui { fragment, watch } => {
            let watch = watch || config.project.watch;
            output.verbose_ctx(
                "tui",
                &format!("Launching viewer: fragment={:?}, watch={}", fragment, watch),
            );
            tui::run(&output, &config, source, fragment.as_deref(), watch)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
