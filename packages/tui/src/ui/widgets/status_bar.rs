use crate::state::{AppState, HomeTab, Screen};
use onboard_core::Control;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Status bar with breadcrumb and context-aware shortcuts
pub struct StatusBarWidget<'a> {
    state: &'a AppState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn breadcrumb(&self) -> String {
        let mut crumb = match self.state.screen {
            Screen::Splash => " Onboard".to_string(),
            Screen::Login => " Login".to_string(),
            Screen::Signup => " Sign Up".to_string(),
            Screen::Home(HomeTab::Chat) => {
                let flow = &self.state.chat.flow;
                format!(
                    " Chat (Step {}/{})",
                    flow.current_step_index() + 1,
                    flow.steps().len()
                )
            }
            Screen::Home(tab) => format!(" {}", tab),
        };
        if let Some(user) = self.state.session.user() {
            crumb.push_str(&format!(" • {}", user));
        }
        crumb
    }

    pub fn shortcuts(&self) -> &'static str {
        if self.state.alert.is_some() {
            return "Enter: OK";
        }
        match self.state.screen {
            Screen::Splash => "Any key: Continue",
            Screen::Login => "Tab: Next • Enter: Select • Ctrl+C: Quit",
            Screen::Signup => "Tab: Next • Enter: Select • Esc: Back",
            Screen::Home(HomeTab::Chat) => {
                if self.state.chat.date_picker.is_some() || self.state.chat.file_picker.is_some() {
                    return "Enter: Pick • Esc: Cancel";
                }
                match self.state.chat.control() {
                    Control::TextBox => "Enter: Send • Tab: Next Tab • Ctrl+L: Logout",
                    Control::MenuButtons(_) | Control::Review { .. } => {
                        "←/→: Choose • Enter: Select • Tab: Next Tab"
                    }
                    Control::DatePicker { .. } | Control::FilePicker(_) => {
                        "Enter: Open Picker • Tab: Next Tab"
                    }
                    Control::Disabled => "Working...",
                }
            }
            Screen::Home(HomeTab::Help) => "Arrows: Move • Enter: Select • Tab: Next Tab",
            Screen::Home(HomeTab::Home) => "Tab: Next Tab • Ctrl+L: Logout • Ctrl+C: Quit",
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let shortcuts = self.shortcuts();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(shortcuts.chars().count() as u16 + 1),
            ])
            .split(area);

        Paragraph::new(self.breadcrumb())
            .style(Style::default().fg(Color::Gray))
            .render(chunks[0], buf);
        Paragraph::new(shortcuts)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[1], buf);
    }
}
