use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::popups::centered_area;

/// Blocking notice with a single OK button
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDialog {
    pub title: String,
    pub message: String,
}

impl AlertDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Failure notices are drawn in red
    pub fn is_error(&self) -> bool {
        self.title.eq_ignore_ascii_case("error")
    }

    /// Whether `key` dismisses the dialog
    pub fn dismisses(key: crossterm::event::KeyCode) -> bool {
        matches!(
            key,
            crossterm::event::KeyCode::Enter
                | crossterm::event::KeyCode::Esc
                | crossterm::event::KeyCode::Char(' ')
        )
    }
}

pub struct AlertDialogWidget<'a> {
    dialog: &'a AlertDialog,
}

impl<'a> AlertDialogWidget<'a> {
    pub fn new(dialog: &'a AlertDialog) -> Self {
        Self { dialog }
    }
}

impl<'a> Widget for AlertDialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (area.width / 3).max(44);
        let text_width = width.saturating_sub(4).max(1);
        let message_rows = (self.dialog.message.len() as u16).div_ceil(text_width);
        let dialog_area = centered_area(area, width, message_rows + 6);
        Clear.render(dialog_area, buf);

        let color = if self.dialog.is_error() {
            Color::Red
        } else {
            Color::Green
        };

        let block = Block::default()
            .title(self.dialog.title.as_str())
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        Paragraph::new(self.dialog.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        Paragraph::new(Line::from(vec![Span::styled(
            "[OK]",
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_error_styling_and_dismiss_keys() {
        assert!(AlertDialog::new("Error", "x").is_error());
        assert!(!AlertDialog::new("Success", "x").is_error());
        assert!(AlertDialog::dismisses(KeyCode::Enter));
        assert!(!AlertDialog::dismisses(KeyCode::Char('q')));
    }
}
