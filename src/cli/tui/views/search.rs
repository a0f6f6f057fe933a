//! Search results, shown in place of the sidebar while typing a query

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::cli::tui::app::App;
use crate::cli::tui::utils::truncate_str;

/// Draw the search results panel
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let controller = app.controller();
    let width = usize::from(area.width.saturating_sub(6));
    let block = Block::default()
        .title(format!("Search: {}", controller.query()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if !controller.search().is_active() {
        let hint = Paragraph::new("Type to search titles, descriptions and categories")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let results = controller.search_results();
    if results.is_empty() {
        let empty = Paragraph::new("No matching sections").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        truncate_str(&entry.title, width),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", entry.category),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::raw(format!("  {}", truncate_str(&entry.description, width))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.result_index()));

    frame.render_stateful_widget(list, area, &mut state);
}
