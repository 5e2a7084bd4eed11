use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::date_picker::{DatePart, DatePicker};
use crate::file_picker::FilePicker;

/// Centered rectangle of at most `width` x `height`
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub struct DatePickerWidget<'a> {
    picker: &'a DatePicker,
}

impl<'a> DatePickerWidget<'a> {
    pub fn new(picker: &'a DatePicker) -> Self {
        Self { picker }
    }
}

impl<'a> Widget for DatePickerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_area(area, 36, 7);
        Clear.render(popup, buf);

        let mut spans = Vec::new();
        for (part, label) in self.picker.parts() {
            let style = if part == self.picker.part() {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!(" {} ", label), style));
            if part != DatePart::Year {
                spans.push(Span::raw(" "));
            }
        }

        let mut lines = vec![Line::from(spans).alignment(Alignment::Center), Line::raw("")];
        if let Some(max) = self.picker.max() {
            lines.push(
                Line::from(Span::styled(
                    format!("Latest allowed: {}", max.format("%d %b %Y")),
                    Style::default().fg(Color::DarkGray),
                ))
                .alignment(Alignment::Center),
            );
        }
        lines.push(
            Line::from(Span::styled(
                "←/→ field • ↑/↓ change • Enter pick • Esc cancel",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        );

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Select Date of Birth")
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(popup, buf);
    }
}

/// File picker popup with fuzzy-match highlights
pub struct FilePickerWidget<'a> {
    picker: &'a FilePicker,
}

impl<'a> FilePickerWidget<'a> {
    pub fn new(picker: &'a FilePicker) -> Self {
        Self { picker }
    }
}

impl<'a> Widget for FilePickerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let entries = self.picker.entries();
        let popup = centered_area(area, 64, entries.len() as u16 + 6);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Choose a file ({})",
                self.picker.filter().extensions().join(", ")
            ))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::Yellow)),
            Span::raw(self.picker.input().content()),
        ])];

        for (idx, entry) in entries.iter().enumerate() {
            let base = if idx == self.picker.selected_index() {
                Style::default().bg(Color::Blue)
            } else {
                Style::default()
            };
            let mut spans: Vec<Span> = entry
                .name
                .chars()
                .enumerate()
                .map(|(char_idx, ch)| {
                    let style = if entry.match_indices.contains(&char_idx) {
                        base.fg(Color::Yellow).add_modifier(Modifier::BOLD)
                    } else if entry.is_dir {
                        base.fg(Color::Blue).add_modifier(Modifier::BOLD)
                    } else {
                        base.fg(Color::White)
                    };
                    Span::styled(ch.to_string(), style)
                })
                .collect();
            if entry.is_dir {
                spans.push(Span::styled("/", base.fg(Color::Blue)));
            }
            lines.push(Line::from(spans));
        }

        if entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "No matching files",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
        if let Some(error) = self.picker.error() {
            lines.push(Line::from(Span::styled(error, Style::default().fg(Color::Red))));
        }
        lines.push(Line::from(Span::styled(
            "↑↓ Navigate • Tab Complete • Enter Pick • Esc Cancel",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
