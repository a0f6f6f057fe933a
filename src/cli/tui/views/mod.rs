//! Views for the documentation viewer

pub mod content;
pub mod search;
pub mod sidebar;
pub mod status;

use ratatui::prelude::*;

use super::app::{App, InputMode};

/// Draw the whole screen: navigation panel, content pane and status bar
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Panels
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[0]);

    match app.input_mode() {
        InputMode::Search(_) => search::draw(frame, app, panels[0]),
        _ => sidebar::draw(frame, app, panels[0]),
    }
    content::draw(frame, app, panels[1]);
    status::draw(frame, app, main_chunks[1]);
}
