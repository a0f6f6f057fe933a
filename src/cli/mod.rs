//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Scaffold `.docnav/config.toml` and a starter manifest |
//! | `list` | Categories and sections in sidebar order |
//! | `show [FRAGMENT]` | Render one section (`#installation`, or the default) |
//! | `search <QUERY>` | Case-insensitive search over titles, descriptions and categories |
//! | `check` | Validate the manifest |
//! | `tui` | Interactive viewer with history, search and live reload |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! docnav --verbose show '#quick-start'
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod browse;
mod output;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
