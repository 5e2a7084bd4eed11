use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::input::TextField;

/// Stacked labelled inputs, each in its own bordered box
pub struct FormFieldsWidget<'a> {
    fields: Vec<&'a TextField>,
    /// Index into `fields`, or `None` when a button has focus
    focused: Option<usize>,
}

impl<'a> FormFieldsWidget<'a> {
    pub fn new(fields: Vec<&'a TextField>, focused: Option<usize>) -> Self {
        Self { fields, focused }
    }

    /// Rows needed to draw every field
    pub fn height(&self) -> u16 {
        self.fields.len() as u16 * 3
    }
}

impl<'a> Widget for FormFieldsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (idx, field) in self.fields.iter().enumerate() {
            let y = area.y + idx as u16 * 3;
            if y + 3 > area.bottom() {
                break;
            }
            let field_area = Rect::new(area.x, y, area.width, 3);
            let focused = self.focused == Some(idx);

            let block = Block::default()
                .borders(Borders::ALL)
                .title(field.label)
                .border_style(if focused {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Gray)
                });
            let inner = block.inner(field_area);
            Paragraph::new(field.display())
                .block(block)
                .render(field_area, buf);

            if focused && inner.width > 0 {
                let column = field.buffer.cursor_display_column(field.mask);
                let x = inner.x + column.min(inner.width.saturating_sub(1));
                let cell = &mut buf[(x, inner.y)];
                cell.set_style(cell.style().add_modifier(Modifier::REVERSED));
            }
        }
    }
}

/// Clickable-looking text line; highlighted when focused
pub fn action_line(label: &str, focused: bool) -> Line<'_> {
    let style = if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(Span::styled(format!("[{}]", label), style)).alignment(Alignment::Center)
}
