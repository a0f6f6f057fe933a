//! Interactive documentation viewer
//!
//! A sidebar of categories and sections next to the active section's
//! content, driven by a [`DocsController`](crate::domain::DocsController).
//! With `--watch`, edits to the manifest or its section files reload the
//! doc set in place.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::storage::{Config, DocSource};
use app::App;
use event::EventHandler;

/// Launch the viewer
pub fn run(
    output: &Output,
    config: &Config,
    source: DocSource,
    fragment: Option<&str>,
    watch: bool,
) -> Result<()> {
    output.verbose_ctx("tui", &format!("Loading documentation from {}", source));

    // Load before touching the terminal so errors print normally
    let docs = source.load(&config.project)?;

    let mut event_handler = EventHandler::new(config.global.tick_rate_ms);
    if watch {
        let files = source.watch_files()?;
        if files.is_empty() {
            output.verbose_ctx("tui", "Built-in docs never change; not watching");
        } else {
            output.verbose_ctx("tui", &format!("Watching {} file(s)", files.len()));
            event_handler.watch(&files)?;
        }
    }

    let mut app = App::new(docs, source, config.project.clone(), fragment);

    let mut terminal = ui::init_terminal()?;

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Viewer panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Viewer panicked: {}", s))
            } else {
                Err(anyhow!("Viewer panicked with unknown error"))
            }
        }
    }
}
