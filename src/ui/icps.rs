//! ICP list view rendering

use crate::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Ideal Customer Profiles — sort: {} {} ",
        app.state.icp_sort_field.label(),
        app.state.icp_sort_direction.symbol()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let icps = app.state.sorted_icps();
    if icps.is_empty() {
        frame.render_widget(
            Paragraph::new("No profiles yet — press 'n' to create one")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let [header, rows] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{:<32}", "Name"), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{:<16}", "Industry"), Style::default().fg(Color::DarkGray)),
            Span::styled("Company Size", Style::default().fg(Color::DarkGray)),
        ])),
        header,
    );

    let visible = rows.height as usize;
    let offset = app.state.selected_index.saturating_sub(visible.saturating_sub(1));
    let lines: Vec<Line> = icps
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, icp)| {
            let selected = i == app.state.selected_index;
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!(
                    "{:<32}{:<16}{}",
                    truncate(&icp.name, 30),
                    truncate(&icp.industry, 14),
                    icp.company_size
                ),
                style,
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), rows);
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
