//! Status bar: input prompts, messages and navigation hints

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::{App, InputMode};
use crate::domain::Fragment;

/// Draw the status bar
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = app
                .status_message()
                .unwrap_or("[/]search [:]goto [ [ ] ]history [space]toggle [r]eload [q]uit [?]help");
            (msg.to_string(), Style::default())
        }
        InputMode::Search(query) => (
            format!("Search: {}_  (enter: open, esc: cancel)", query),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Goto(target) => (
            format!("Go to: {}_", target),
            Style::default().fg(Color::Green),
        ),
    };

    let location = app.controller().location();
    let back = if location.can_go_back() { "<" } else { " " };
    let forward = if location.can_go_forward() { ">" } else { " " };
    let watch = if app.is_watching() { " [watching]" } else { "" };

    let status_text = format!(
        "docnav {}{} {}{} {}",
        back,
        forward,
        Fragment::for_id(app.controller().active()),
        watch,
        content
    );

    let paragraph = Paragraph::new(status_text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
