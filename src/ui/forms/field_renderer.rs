//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field occupies: bordered value area plus an error line
pub fn field_height(field: &FormField) -> u16 {
    let value_rows: u16 = if field.is_multiline { 4 } else { 1 };
    // borders (2) + value + inline error line
    value_rows + 3
}

/// Draw a form field with its inline validation error, if any
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active && !field.is_select() {
        "▌"
    } else {
        ""
    };

    let mut lines: Vec<Line> = if field.is_multiline {
        display_str
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect()
    } else {
        vec![Line::from(vec![
            Span::styled(display_str.clone(), style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])]
    };

    if field.is_multiline && is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        } else {
            lines.push(Line::from(Span::styled(
                cursor,
                Style::default().fg(Color::Cyan),
            )));
        }
    }

    if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            format!("✗ {message}"),
            Style::default().fg(Color::Red),
        )));
    }

    let title = if field.is_select() && is_active {
        format!(" {} (←/→ to choose) ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
