//! Audit log view rendering

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Audit Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.state.audit_logs.is_empty() {
        frame.render_widget(
            Paragraph::new("No audit entries").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = app
        .state
        .audit_logs
        .iter()
        .skip(app.state.scroll_offset)
        .take(inner.height as usize)
        .map(|log| {
            let when = log
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "—".to_string());
            Line::from(vec![
                Span::styled(format!("{when}  "), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<8}", log.action),
                    Style::default().fg(action_color(&log.action)),
                ),
                Span::raw(format!("{} #{}", log.resource_type, log.resource_id)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn action_color(action: &str) -> Color {
    match action {
        "create" => Color::Green,
        "update" => Color::Yellow,
        "delete" => Color::Red,
        _ => Color::Gray,
    }
}
