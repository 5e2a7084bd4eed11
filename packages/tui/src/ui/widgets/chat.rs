use onboard_core::{Message, Role};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::input::InputBuffer;

/// Transcript view
pub struct ChatWidget<'a> {
    messages: &'a [Message],
    scroll_offset: usize,
    show_timestamps: bool,
}

impl<'a> ChatWidget<'a> {
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            scroll_offset: 0,
            show_timestamps: false,
        }
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    fn format_message(&self, message: &'a Message) -> Vec<Line<'a>> {
        let (author_style, alignment) = match message.role {
            Role::Bot => (
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                Alignment::Left,
            ),
            Role::User => (
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                Alignment::Right,
            ),
        };

        let mut author_line = vec![Span::styled(message.author_label(), author_style)];
        if self.show_timestamps {
            author_line.push(Span::styled(
                format!(" [{}]", message.timestamp.format("%H:%M:%S")),
                Style::default().fg(Color::Gray),
            ));
        }

        let mut lines = vec![Line::from(author_line).alignment(alignment)];
        lines.extend(
            message
                .text
                .lines()
                .map(|text| Line::from(Span::raw(text)).alignment(alignment)),
        );
        lines.push(Line::from(""));
        lines
    }
}

impl<'a> Widget for ChatWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Chat (PgUp/PgDn to scroll)")
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area);

        let lines: Vec<Line> = self
            .messages
            .iter()
            .flat_map(|message| self.format_message(message))
            .collect();

        // Stick to the newest messages unless the user scrolled back
        let width = inner.width.max(1) as usize;
        let rows: usize = lines
            .iter()
            .map(|line| line.width().div_ceil(width).max(1))
            .sum();
        let bottom = rows.saturating_sub(inner.height as usize);
        let top = bottom.saturating_sub(self.scroll_offset);

        block.render(area, buf);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((top.min(u16::MAX as usize) as u16, 0))
            .render(inner, buf);
    }
}

/// Single-line answer box with validation feedback
pub struct InputWidget<'a> {
    buffer: &'a InputBuffer,
    placeholder: &'a str,
    error: Option<&'a str>,
    shaking: bool,
    enabled: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(buffer: &'a InputBuffer) -> Self {
        Self {
            buffer,
            placeholder: "Type your answer...",
            error: None,
            shaking: false,
            enabled: true,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn shaking(mut self, shaking: bool) -> Self {
        self.shaking = shaking;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = match (self.shaking, self.error.is_some(), self.enabled) {
            (true, _, _) => Color::Red,
            (_, true, _) => Color::LightRed,
            (_, _, false) => Color::DarkGray,
            _ => Color::White,
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        if self.shaking {
            block = block.border_type(ratatui::widgets::BorderType::Thick);
        }
        if let Some(error) = self.error {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let (text, style) = if self.buffer.is_empty() {
            (self.placeholder.to_string(), Style::default().fg(Color::Gray))
        } else {
            (self.buffer.content().to_string(), Style::default().fg(Color::White))
        };
        Paragraph::new(text).style(style).render(inner, buf);

        if self.enabled && inner.width > 0 && inner.height > 0 {
            let column = self.buffer.cursor_display_column(None);
            let x = inner.x + column.min(inner.width.saturating_sub(1));
            let cell = &mut buf[(x, inner.y)];
            cell.set_style(cell.style().add_modifier(Modifier::REVERSED));
        }
    }
}
