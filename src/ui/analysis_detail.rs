//! Analysis result view rendering

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Analysis Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(analysis) = &app.state.analysis else {
        frame.render_widget(
            Paragraph::new("No analysis yet")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let mut lines = Vec::new();
    match analysis.resonance_score {
        Some(score) => lines.push(Line::from(vec![
            Span::styled("Resonance score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{score:.0}"),
                Style::default().fg(score_color(score)).add_modifier(Modifier::BOLD),
            ),
        ])),
        None => lines.push(Line::from(Span::styled(
            "Resonance score pending",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let feedback = &analysis.feedback;
    if let Some(alignment) = feedback.icp_alignment_score {
        lines.push(Line::from(vec![
            Span::styled("ICP alignment: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{alignment:.1}")),
        ]));
    }
    if let Some(persona) = feedback.persona_match_score {
        lines.push(Line::from(vec![
            Span::styled("Persona match: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{persona:.1}")),
        ]));
    }

    push_section(&mut lines, "Strengths", &feedback.strengths, Color::Green);
    push_section(&mut lines, "Weaknesses", &feedback.weaknesses, Color::Red);
    push_section(
        &mut lines,
        "Suggestions",
        &feedback.improvement_suggestions,
        Color::Yellow,
    );

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.state.scroll_offset as u16, 0))
            .block(block),
        area,
    );
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &str, items: &[String], color: Color) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    for item in items {
        lines.push(Line::from(format!("  • {item}")));
    }
}

fn score_color(score: f64) -> Color {
    if score >= 75.0 {
        Color::Green
    } else if score >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}
