use onboard_core::{FieldKey, FormRecord};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Horizontal row of bracketed buttons; ←/→ moves the highlight
pub struct ButtonRowWidget<'a> {
    labels: &'a [String],
    selected: usize,
    title: &'a str,
    enabled: bool,
}

impl<'a> ButtonRowWidget<'a> {
    pub fn new(labels: &'a [String], selected: usize) -> Self {
        Self {
            labels,
            selected,
            title: "",
            enabled: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn button_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(self.labels.len() * 2);
        for (idx, label) in self.labels.iter().enumerate() {
            let style = if !self.enabled {
                Style::default().fg(Color::DarkGray)
            } else if idx == self.selected {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!("[{}]", label), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl<'a> Widget for ButtonRowWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(Style::default().fg(Color::Cyan));
        Paragraph::new(self.button_line())
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Summary of collected answers shown on the review step
pub struct ReviewPanelWidget<'a> {
    record: &'a FormRecord,
}

impl<'a> ReviewPanelWidget<'a> {
    pub fn new(record: &'a FormRecord) -> Self {
        Self { record }
    }
}

/// Value as shown to the user; attachments show their file name
pub fn display_value(field: FieldKey, value: &str) -> String {
    if !field.is_attachment() || value.is_empty() {
        return value.to_string();
    }
    if value.starts_with("file://") {
        return onboard_core::display_name_from_uri(value).unwrap_or_else(|| value.to_string());
    }
    // Inline base64 image content
    "(image attached)".to_string()
}

impl<'a> Widget for ReviewPanelWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = FieldKey::ALL
            .iter()
            .map(|field| {
                let value = self.record.get(*field).unwrap_or("");
                Line::from(vec![
                    Span::styled(
                        format!("{:<14}", field.label()),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(display_value(*field, value)),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Review")
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_value_for_attachments() {
        assert_eq!(
            display_value(FieldKey::Document, "file:///tmp/resume.pdf"),
            "resume.pdf"
        );
        assert_eq!(
            display_value(FieldKey::ProfilePhoto, &"A".repeat(100)),
            "(image attached)"
        );
        assert_eq!(display_value(FieldKey::Name, "Ada"), "Ada");
    }

    #[test]
    fn test_button_row_renders_labels() {
        let labels = vec!["Edit Information".to_string(), "Save".to_string()];
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        ButtonRowWidget::new(&labels, 1).render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 1)].symbol()).collect();
        assert!(row.contains("[Edit Information] [Save]"));
    }
}
