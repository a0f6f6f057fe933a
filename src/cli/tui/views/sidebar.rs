//! Sidebar: categories and the sections of expanded ones

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::cli::tui::app::{App, Focus};
use crate::cli::tui::utils::truncate_str;
use crate::domain::SidebarRow;

/// Draw the sidebar panel
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Sidebar;
    let active = app.controller().active();
    let width = usize::from(area.width.saturating_sub(8));

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|row| match row {
            SidebarRow::Category {
                title,
                expanded,
                sections,
                ..
            } => {
                let arrow = if *expanded { "▾" } else { "▸" };
                ListItem::new(format!("{} {} ({})", arrow, truncate_str(title, width), sections))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            }
            SidebarRow::Section { id, title, .. } => {
                let is_active = id == active;
                let marker = if is_active { "●" } else { " " };
                let style = if is_active {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(format!("  {} {}", marker, truncate_str(title, width))).style(style)
            }
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(app.controller().docs().title().to_string())
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.sidebar_index()));

    frame.render_stateful_widget(list, area, &mut state);
}
