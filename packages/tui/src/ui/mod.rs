pub mod auth;
pub mod chat;
pub mod home;
pub mod widgets;

use crate::state::{AppState, HomeTab, Screen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use widgets::{AlertDialogWidget, StatusBarWidget};

/// Main UI rendering function
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());
    let main_area = chunks[0];

    match state.screen {
        Screen::Splash => render_splash(frame, main_area),
        Screen::Login => auth::render_login(frame, state, main_area),
        Screen::Signup => auth::render_signup(frame, state, main_area),
        Screen::Home(tab) => {
            let tab_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)])
                .split(main_area);
            home::render_tabs(frame, tab, tab_chunks[0]);
            match tab {
                HomeTab::Home => home::render_home(frame, state, tab_chunks[1]),
                HomeTab::Chat => chat::render_with_area(frame, state, tab_chunks[1]),
                HomeTab::Help => home::render_help(frame, state, tab_chunks[1]),
            }
        }
    }

    frame.render_widget(StatusBarWidget::new(state), chunks[1]);

    if let Some(alert) = &state.alert {
        frame.render_widget(AlertDialogWidget::new(alert), frame.area());
    }
}

fn render_splash(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Onboard",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Tell us about yourself, one question at a time.",
            Style::default().fg(Color::Gray),
        )),
    ];
    let height = lines.len() as u16 + 2;
    let splash = widgets::centered_area(area, 56, height);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        splash,
    );
}
