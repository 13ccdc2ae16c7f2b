//! Email analyzer view rendering

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Analyze a cold email ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [picker, content, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(inner);

    let target = app
        .state
        .icps
        .get(app.analyze_form.selected_icp)
        .map(|icp| icp.name.as_str())
        .unwrap_or("(no profiles — create one first)");
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Target ICP: ", Style::default().fg(Color::DarkGray)),
            Span::styled(target, Style::default().fg(Color::Cyan)),
            Span::styled("  (←/→ to choose)", Style::default().fg(Color::DarkGray)),
        ])),
        picker,
    );

    let error = app.analyze_errors.get("emailContent");
    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let content_block = Block::default()
        .title(" Email Content ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let mut lines: Vec<Line> = app
        .analyze_form
        .content
        .as_str()
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    if lines.is_empty() {
        lines.push(Line::default());
    }
    if let Some(last) = lines.last_mut() {
        last.spans
            .push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            format!("✗ {message}"),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(content_block),
        content,
    );

    frame.render_widget(
        Paragraph::new(format!("{SUBMIT_SHORTCUT}: analyze  Esc: back"))
            .style(Style::default().fg(Color::DarkGray)),
        hint,
    );
}
