//! Event handling for the TUI

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};

/// Delay before a burst of file changes triggers a reload
const WATCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Terminal and file events
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event (width, height)
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
    /// A watched documentation file changed
    Reload,
    /// The file watcher reported an error
    WatchError(String),
}

/// Handles terminal events in a separate thread
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    /// Kept alive for as long as the handler; dropping it stops watching
    watcher: Option<Debouncer<RecommendedWatcher>>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    let sent = match evt {
                        // Only key presses, not releases
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            tx_clone.send(Event::Key(key))
                        }
                        CrosstermEvent::Resize(w, h) => tx_clone.send(Event::Resize(w, h)),
                        _ => Ok(()),
                    };
                    if sent.is_err() {
                        break;
                    }
                }
            } else if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });

        Self {
            rx,
            tx,
            watcher: None,
        }
    }

    /// Sends `Event::Reload` whenever one of `files` changes
    ///
    /// Parent directories are watched rather than the files themselves so
    /// that editors which save by renaming are still picked up.
    pub fn watch(&mut self, files: &[PathBuf]) -> Result<()> {
        let (dirs, watched) = watch_targets(files)?;

        let tx = self.tx.clone();
        let mut debouncer = new_debouncer(WATCH_DEBOUNCE, move |result: DebounceEventResult| {
            let event = match result {
                Ok(events) => {
                    if !events.iter().any(|e| is_watched(&watched, &e.path)) {
                        return;
                    }
                    Event::Reload
                }
                Err(e) => Event::WatchError(e.to_string()),
            };
            let _ = tx.send(event);
        })
        .context("Failed to start file watcher")?;

        for dir in &dirs {
            debouncer
                .watcher()
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", dir.display()))?;
        }

        self.watcher = Some(debouncer);
        Ok(())
    }

    /// Returns true if a file watcher is active
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}

/// Directories to watch and the full paths of the files inside them that matter
fn watch_targets(files: &[PathBuf]) -> Result<(Vec<PathBuf>, HashSet<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut watched = HashSet::new();

    for file in files {
        let parent = match file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let dir = parent
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", parent.display()))?;
        if let Some(name) = file.file_name() {
            watched.insert(dir.join(name));
        }
        dirs.push(dir);
    }

    dirs.sort();
    dirs.dedup();
    Ok((dirs, watched))
}

fn is_watched(watched: &HashSet<PathBuf>, path: &Path) -> bool {
    watched.contains(path)
        || path
            .canonicalize()
            .map(|p| watched.contains(&p))
            .unwrap_or(false)
}
