//! Profile wizard view rendering

use crate::app::App;
use crate::platform::DISCARD_SHORTCUT;
use crate::state::{WizardSession, STEPS};
use crate::ui::forms::{draw_field, field_height};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.wizard else {
        return;
    };

    let [card] = Layout::horizontal([Constraint::Max(90)])
        .flex(Flex::Center)
        .areas(area);

    let block = Block::default()
        .title(format!(
            " Step {}/{}: {} ",
            session.step() + 1,
            STEPS.len(),
            session.step_title()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let [progress, body, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(progress_line(session), progress);

    if session.is_review() {
        draw_review(frame, body, session);
    } else {
        draw_step_fields(frame, body, session);
    }

    let hint_text = if session.is_review() {
        format!("Enter: save  Backspace: back  {DISCARD_SHORTCUT}: discard draft  Esc: close")
    } else {
        format!("Tab: next field  Enter: continue  {DISCARD_SHORTCUT}: discard draft  Esc: close")
    };
    frame.render_widget(
        Paragraph::new(hint_text).style(Style::default().fg(Color::DarkGray)),
        hint,
    );
}

fn progress_line(session: &WizardSession) -> Paragraph<'static> {
    let spans: Vec<Span> = (0..STEPS.len())
        .map(|i| {
            let marker = if i < session.step() {
                "●"
            } else if i == session.step() {
                "◉"
            } else {
                "○"
            };
            let style = if i <= session.step() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!("{marker} "), style)
        })
        .collect();
    Paragraph::new(Line::from(spans))
}

fn draw_step_fields(frame: &mut Frame, area: Rect, session: &WizardSession) {
    let fields: Vec<_> = session
        .step_fields()
        .iter()
        .filter_map(|name| session.form.field(name))
        .collect();

    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    let areas = Layout::vertical(constraints).split(area);

    for (i, field) in fields.iter().enumerate() {
        draw_field(
            frame,
            areas[i],
            field,
            i == session.active_field() && !session.is_submitting,
            session.errors.get(field.name).map(String::as_str),
        );
    }
}

fn draw_review(frame: &mut Frame, area: Rect, session: &WizardSession) {
    let values = session.form.values();
    let mut lines = vec![
        review_line("ICP Name", &values.name),
        review_line("Industry", &values.industry),
        review_line("Company Size", &values.company_size),
        review_line("Target Role", &values.persona_title),
        review_line("Responsibilities", &values.persona_responsibilities),
        review_line("Pain Points", &values.pain_points),
        review_line("Goals", &values.goals),
    ];
    if !values.description.is_empty() {
        lines.insert(1, review_line("Description", &values.description));
    }

    if session.is_submitting {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Saving…",
            Style::default().fg(Color::Cyan),
        )));
    }

    // Union of all step errors, shown when a resubmission got blocked
    if !session.errors.is_empty() {
        lines.push(Line::default());
        for (field, message) in &session.errors {
            lines.push(Line::from(Span::styled(
                format!("✗ {field}: {message}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    if let Some(message) = &session.submit_error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("✗ {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn review_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value.to_string()),
    ])
}
