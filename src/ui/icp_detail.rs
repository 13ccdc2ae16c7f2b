//! ICP detail view rendering

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(icp) = app.state.selected_icp() else {
        frame.render_widget(
            Paragraph::new("Profile not found").style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", icp.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![
        labeled("Industry", &icp.industry),
        labeled("Company Size", &icp.company_size),
        labeled("Target Role", &icp.persona_title),
        Line::default(),
        labeled("Responsibilities", &icp.persona_responsibilities),
        Line::default(),
        labeled("Pain Points", &icp.pain_points),
        Line::default(),
        labeled("Goals & Motivations", &icp.goals),
    ];
    if !icp.description.is_empty() {
        lines.insert(0, labeled("Description", &icp.description));
        lines.insert(1, Line::default());
    }
    if let Some(created) = icp.created_at {
        lines.push(Line::default());
        lines.push(labeled("Created", &created.format("%Y-%m-%d %H:%M").to_string()));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.state.scroll_offset as u16, 0))
            .block(block),
        area,
    );
}

fn labeled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}
