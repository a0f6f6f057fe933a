//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::utils::clamp_index;
use super::views;
use crate::domain::{DocSet, DocsController, Fragment, Location, SidebarRow};
use crate::storage::{DocSource, ProjectConfig};

/// Lines moved by PageUp/PageDown in the content pane
const PAGE: u16 = 10;

const HELP: &str =
    "j/k:move enter:open space:toggle /:search ::goto [/]:back/fwd tab:focus +/-:all r:reload q:quit";

/// Which panel has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Content,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Sidebar,
        }
    }
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a search query; results replace the sidebar
    Search(String),
    /// Typing a fragment to jump to
    Goto(String),
}

/// Application state
pub struct App {
    controller: DocsController,

    /// Where the docs were loaded from, for reloads
    source: DocSource,

    /// Project overrides applied on every load
    project: ProjectConfig,

    focus: Focus,
    input_mode: InputMode,

    /// Selected row in the sidebar's visible rows
    sidebar_index: usize,

    /// Selected search result
    result_index: usize,

    /// Content pane scroll offset, in lines
    scroll: u16,

    status_message: Option<String>,
    should_quit: bool,
    watching: bool,
}

impl App {
    /// Create a new application showing `fragment` (or the default section)
    pub fn new(
        docs: DocSet,
        source: DocSource,
        project: ProjectConfig,
        fragment: Option<&str>,
    ) -> Self {
        let location = Location::parse(fragment.unwrap_or_default());
        let controller = DocsController::start(docs, location, project.controller_options());

        let mut app = Self {
            controller,
            source,
            project,
            focus: Focus::Sidebar,
            input_mode: InputMode::Normal,
            sidebar_index: 0,
            result_index: 0,
            scroll: 0,
            status_message: None,
            should_quit: false,
            watching: false,
        };
        app.select_active_row();
        app
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        self.watching = events.is_watching();

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(_, _) => {} // ratatui redraws at the new size
                Event::Tick => self.on_tick(),
                Event::Reload => self.reload(),
                Event::WatchError(e) => {
                    self.status_message = Some(format!("Watch error: {}", e));
                }
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        views::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search(_) => self.handle_search_key(key),
            InputMode::Goto(_) => self.handle_goto_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(1),
            KeyCode::PageDown => self.move_down(PAGE),
            KeyCode::PageUp => self.move_up(PAGE),

            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggle(),
            KeyCode::Char('h') | KeyCode::Left => self.focus = Focus::Sidebar,
            KeyCode::Char('l') | KeyCode::Right => self.focus = Focus::Content,

            KeyCode::Enter => self.open_selected_row(),
            KeyCode::Char(' ') => self.toggle_selected_category(),
            KeyCode::Char('+') => {
                self.controller.expand_all();
                self.select_active_row();
            }
            KeyCode::Char('-') => {
                self.controller.collapse_all();
                self.clamp_sidebar_index();
            }

            KeyCode::Char('[') => {
                if self.controller.back() {
                    self.after_navigation();
                } else {
                    self.status_message = Some("No earlier section".to_string());
                }
            }
            KeyCode::Char(']') => {
                if self.controller.forward() {
                    self.after_navigation();
                } else {
                    self.status_message = Some("No later section".to_string());
                }
            }

            KeyCode::Char('/') => {
                self.controller.clear_query();
                self.result_index = 0;
                self.input_mode = InputMode::Search(String::new());
            }
            KeyCode::Char(':') => self.input_mode = InputMode::Goto(String::new()),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('?') => self.status_message = Some(HELP.to_string()),

            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let mut query = match &self.input_mode {
            InputMode::Search(q) => q.clone(),
            _ => return,
        };

        match key.code {
            KeyCode::Esc => {
                self.controller.clear_query();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if self.controller.search_results().is_empty() {
                    self.status_message = Some("No matching section".to_string());
                } else if self.controller.select_search_result(self.result_index).moved() {
                    self.after_navigation();
                }
                self.controller.clear_query();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Down => {
                let len = self.controller.search_results().len();
                self.result_index = clamp_index(self.result_index + 1, len);
            }
            KeyCode::Up => self.result_index = self.result_index.saturating_sub(1),
            KeyCode::Backspace => {
                query.pop();
                self.update_query(query);
            }
            KeyCode::Char(c) => {
                query.push(c);
                self.update_query(query);
            }
            _ => {}
        }
    }

    fn update_query(&mut self, query: String) {
        self.controller.set_query(&query);
        self.result_index = 0;
        self.input_mode = InputMode::Search(query);
    }

    fn handle_goto_key(&mut self, key: KeyEvent) {
        let mut target = match &self.input_mode {
            InputMode::Goto(t) => t.clone(),
            _ => return,
        };

        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if self.controller.navigate(&target) {
                    self.after_navigation();
                }
                let active = self.controller.active();
                let fragment = Fragment::parse(&target);
                if let Some(id) = fragment.id().filter(|id| *id != active.as_str()) {
                    self.status_message =
                        Some(format!("Unknown section '{}', showing '{}'", id, active));
                }
            }
            KeyCode::Backspace => {
                target.pop();
                self.input_mode = InputMode::Goto(target);
            }
            KeyCode::Char(c) => {
                target.push(c);
                self.input_mode = InputMode::Goto(target);
            }
            _ => {}
        }
    }

    fn move_down(&mut self, step: u16) {
        match self.focus {
            Focus::Sidebar => {
                let len = self.rows().len();
                self.sidebar_index = clamp_index(self.sidebar_index + usize::from(step), len);
            }
            Focus::Content => {
                let max = self.content_height().saturating_sub(1);
                self.scroll = self.scroll.saturating_add(step).min(max);
            }
        }
    }

    fn move_up(&mut self, step: u16) {
        match self.focus {
            Focus::Sidebar => {
                self.sidebar_index = self.sidebar_index.saturating_sub(usize::from(step));
            }
            Focus::Content => self.scroll = self.scroll.saturating_sub(step),
        }
    }

    fn open_selected_row(&mut self) {
        match self.rows().get(self.sidebar_index) {
            Some(SidebarRow::Section { id, .. }) => {
                if self.controller.select_section(id.as_str()).moved() {
                    self.after_navigation();
                }
                self.focus = Focus::Content;
            }
            Some(SidebarRow::Category { id, .. }) => {
                self.controller.toggle_category(id.as_str());
            }
            None => {}
        }
    }

    fn toggle_selected_category(&mut self) {
        let category = match self.rows().get(self.sidebar_index) {
            Some(row) => row.category_id().clone(),
            None => return,
        };

        self.controller.toggle_category(category.as_str());

        // Collapsing can hide the selected row; keep the header selected
        if let Some(pos) = self.rows().iter().position(|row| {
            matches!(row, SidebarRow::Category { id, .. } if id == &category)
        }) {
            self.sidebar_index = pos;
        }
    }

    fn on_tick(&mut self) {
        if self.controller.sync_location() {
            self.after_navigation();
        }
    }

    /// Reloads the doc set from its source, keeping the current section if it still exists
    pub fn reload(&mut self) {
        let before = self.controller.active().clone();

        match self.source.load(&self.project) {
            Ok(docs) => {
                if self.controller.reload(docs) {
                    self.after_navigation();
                    self.status_message = Some(format!(
                        "Reloaded; '{}' is gone, showing '{}'",
                        before,
                        self.controller.active()
                    ));
                } else {
                    self.status_message = Some(format!("Reloaded {}", self.source));
                }
                self.clamp_sidebar_index();
                self.result_index =
                    clamp_index(self.result_index, self.controller.search_results().len());
            }
            Err(e) => self.status_message = Some(format!("Reload failed: {:#}", e)),
        }
    }

    /// Resets the content pane and follows the active section in the sidebar
    fn after_navigation(&mut self) {
        self.scroll = 0;
        self.select_active_row();
    }

    fn select_active_row(&mut self) {
        let active = self.controller.active().clone();
        if let Some(pos) = self
            .rows()
            .iter()
            .position(|row| row.section_id() == Some(&active))
        {
            self.sidebar_index = pos;
        } else {
            self.clamp_sidebar_index();
        }
    }

    fn clamp_sidebar_index(&mut self) {
        self.sidebar_index = clamp_index(self.sidebar_index, self.rows().len());
    }

    fn content_height(&self) -> u16 {
        let lines = views::content::content_lines(self.controller.render_active()).len();
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    // --- Accessors for views ---

    pub fn controller(&self) -> &DocsController {
        &self.controller
    }

    /// Sidebar rows currently visible
    pub fn rows(&self) -> Vec<SidebarRow> {
        self.controller
            .sidebar()
            .visible_rows(self.controller.registry())
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn sidebar_index(&self) -> usize {
        self.sidebar_index
    }

    pub fn result_index(&self) -> usize {
        self.result_index
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }
}
