//! UI rendering module

mod analysis_detail;
mod analyze;
mod audit;
pub mod forms;
mod icp_detail;
mod icps;
mod login;
mod wizard;

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the whole UI for the current view
pub fn draw(frame: &mut Frame, app: &App) {
    let [body, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    match app.state.current_view {
        View::Login => login::draw(frame, body, app),
        View::Icps => icps::draw(frame, body, app),
        View::IcpDetail => icp_detail::draw(frame, body, app),
        View::Wizard => wizard::draw(frame, body, app),
        View::Analyze => analyze::draw(frame, body, app),
        View::AnalysisDetail => analysis_detail::draw(frame, body, app),
        View::Audit => audit::draw(frame, body, app),
    }

    draw_status_bar(frame, status, app);

    if let Some(icp_id) = app.state.confirm_delete {
        draw_confirm_modal(frame, app, icp_id);
    }
    if app.state.has_errors() {
        draw_error_modal(frame, app);
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some(message) = &app.state.status_message {
        message.clone()
    } else {
        help_text(&app.state.current_view).to_string()
    };

    let user = app
        .state
        .user_email
        .as_deref()
        .map(|email| format!(" {email} "))
        .unwrap_or_default();

    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(user.len() as u16)])
            .areas(area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        ))),
        left,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            user,
            Style::default().fg(Color::Cyan),
        ))),
        right,
    );
}

fn help_text(view: &View) -> &'static str {
    match view {
        View::Login => "Enter: sign in  Ctrl+C: quit",
        View::Icps => {
            "n: new  e: edit  Enter: open  a: analyze  g: audit  s/S: sort  d: delete  r: refresh  q: quit"
        }
        View::IcpDetail => "e: edit  j/k: scroll  Esc: back",
        View::Wizard => "Enter: continue  Backspace: back a step  Esc: close",
        View::Analyze => "Ctrl+S: analyze  Esc: back",
        View::AnalysisDetail => "j/k: scroll  Esc: back",
        View::Audit => "j/k: scroll  Esc: back",
    }
}

fn draw_error_modal(frame: &mut Frame, app: &App) {
    let Some(message) = app.state.current_error() else {
        return;
    };
    let area = centered(frame.area(), 50, 7);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::default(),
            Line::from(Span::styled(
                "Enter to dismiss",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        ),
        area,
    );
}

fn draw_confirm_modal(frame: &mut Frame, app: &App, icp_id: i64) {
    let name = app
        .state
        .icps
        .iter()
        .find(|icp| icp.id == icp_id)
        .map(|icp| icp.name.as_str())
        .unwrap_or("this profile");
    let area = centered(frame.area(), 50, 7);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(format!("Delete \"{name}\"?")),
            Line::default(),
            Line::from(Span::styled(
                "y: delete  n/Esc: keep",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [horizontal] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(horizontal);
    rect
}
