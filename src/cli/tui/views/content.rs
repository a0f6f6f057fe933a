//! Content pane: the active section's blocks as styled lines

use ratatui::{
    prelude::*,
    widgets::{self, Borders, Paragraph, Wrap},
};

use crate::cli::tui::app::{App, Focus};
use crate::domain::{list_markers, Block, ContentBlock, Fragment, ListMarker};

/// Styled lines for a content block, title first
pub fn content_lines(content: &ContentBlock) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            content.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    for block in &content.blocks {
        lines.push(Line::default());
        match block {
            Block::Heading { level, text } => {
                let marker = "#".repeat(usize::from(*level));
                lines.push(Line::styled(
                    format!("{} {}", marker, text),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Block::Paragraph { text } => {
                lines.extend(text.lines().map(|l| Line::raw(l.to_string())));
            }
            Block::Code { lang, text } => {
                let dim = Style::default().fg(Color::DarkGray);
                lines.push(Line::styled(
                    format!("  ```{}", lang.as_deref().unwrap_or("")),
                    dim,
                ));
                lines.extend(text.lines().map(|l| {
                    Line::styled(format!("  {}", l), Style::default().fg(Color::Green))
                }));
                lines.push(Line::styled("  ```", dim));
            }
            Block::List {
                ordered,
                start,
                items,
            } => {
                let markers = list_markers(*ordered, *start, items);
                for (item, marker) in items.iter().zip(markers) {
                    let indent = "  ".repeat(item.depth + 1);
                    let bullet = match marker {
                        ListMarker::Number(n) => format!("{}.", n),
                        ListMarker::Bullet => "•".to_string(),
                        ListMarker::Continuation => " ".to_string(),
                    };
                    lines.push(Line::raw(format!("{}{} {}", indent, bullet, item.text)));
                }
            }
            Block::Quote { text } => {
                lines.extend(text.lines().map(|l| {
                    Line::styled(
                        format!("│ {}", l),
                        Style::default().add_modifier(Modifier::ITALIC),
                    )
                }));
            }
            Block::Rule => {
                lines.push(Line::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
    }

    lines
}

/// Draw the content pane
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Content;
    let controller = app.controller();
    let content = controller.render_active();

    let title = match controller.registry().category_of(controller.active().as_str()) {
        Some(category) => format!(
            "{} / {}  {}",
            category.title,
            content.title,
            Fragment::for_id(controller.active())
        ),
        None => content.title.clone(),
    };

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(content_lines(content))
        .block(
            widgets::Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(), 0));

    frame.render_widget(paragraph, area);
}
