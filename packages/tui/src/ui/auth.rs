use crate::screens::LoginFocus;
use crate::state::AppState;
use crate::ui::widgets::{action_line, centered_area, FormFieldsWidget};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Login form: credentials, captcha challenge and the signup link
pub fn render_login(frame: &mut Frame, state: &AppState, area: Rect) {
    let login = &state.login;
    let panel = centered_area(area, 52, 22);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Login")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // email + password
            Constraint::Length(1), // captcha challenge
            Constraint::Length(3), // captcha input
            Constraint::Length(1), // error line
            Constraint::Min(3),    // actions
        ])
        .split(inner);

    let credential_focus = match login.focus() {
        LoginFocus::Email => Some(0),
        LoginFocus::Password => Some(1),
        _ => None,
    };
    frame.render_widget(
        FormFieldsWidget::new(vec![&login.email, &login.password], credential_focus),
        chunks[0],
    );

    let challenge = Line::from(vec![
        Span::raw("CAPTCHA: "),
        Span::styled(
            login.form.captcha().code(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
        Span::raw("  "),
        Span::styled(
            "[↻ Refresh]",
            if login.focus() == LoginFocus::RefreshCaptcha {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default().fg(Color::Cyan)
            },
        ),
    ]);
    frame.render_widget(Paragraph::new(challenge), chunks[1]);

    let captcha_focus = (login.focus() == LoginFocus::Captcha).then_some(0);
    frame.render_widget(
        FormFieldsWidget::new(vec![&login.captcha], captcha_focus),
        chunks[2],
    );

    if let Some(error) = login.form.error_message() {
        frame.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            chunks[3],
        );
    }

    let submit_label = if login.is_in_flight() { "Logging in..." } else { "Login" };
    let mut actions = vec![
        action_line(submit_label, login.focus() == LoginFocus::Submit),
        Line::raw(""),
        action_line("Don't have an account? Sign Up", login.focus() == LoginFocus::Signup),
    ];
    if let Some(notice) = &state.notice {
        actions.push(Line::raw(""));
        actions.push(
            Line::from(Span::styled(notice.as_str(), Style::default().fg(Color::Green)))
                .alignment(Alignment::Center),
        );
    }
    frame.render_widget(Paragraph::new(actions), chunks[4]);
}

/// Local signup form
pub fn render_signup(frame: &mut Frame, state: &AppState, area: Rect) {
    let signup = &state.signup;
    let panel = centered_area(area, 52, 18);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Sign Up")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let fields = FormFieldsWidget::new(
        signup.fields.iter().collect(),
        Some(signup.focus_index()).filter(|idx| *idx < signup.fields.len()),
    );
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(fields.height()),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(inner);
    frame.render_widget(fields, chunks[0]);

    if let Some(error) = signup.error() {
        frame.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            chunks[1],
        );
    }

    frame.render_widget(
        Paragraph::new(vec![
            action_line("Sign Up", signup.is_submit_focused()),
            Line::raw(""),
            action_line("Already have an account? Login", signup.is_back_focused()),
        ]),
        chunks[2],
    );
}
