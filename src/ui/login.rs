//! Login view rendering

use crate::app::App;
use crate::state::FormField;
use crate::ui::forms::draw_field;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let [card] = Layout::horizontal([Constraint::Length(60)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::vertical([Constraint::Length(14)])
        .flex(Flex::Center)
        .areas(card);

    let block = Block::default()
        .title(" Resonate — Sign in ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let [intro, email, password, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new("Sign in to analyze your cold emails")
            .style(Style::default().fg(Color::DarkGray)),
        intro,
    );

    let form = &app.login_form;
    draw_field(
        frame,
        email,
        &form.email,
        form.active_field_index == 0,
        app.login_errors.get("email").map(String::as_str),
    );
    // Render the password masked; the real value stays in the form
    let mut masked = FormField::text("password", "Password", false);
    masked.set(&"•".repeat(form.password.as_str().chars().count()));
    draw_field(
        frame,
        password,
        &masked,
        form.active_field_index == 1,
        app.login_errors.get("password").map(String::as_str),
    );

    frame.render_widget(
        Paragraph::new(Line::from("Tab: switch field  Enter: sign in"))
            .style(Style::default().fg(Color::DarkGray)),
        hint,
    );
}
