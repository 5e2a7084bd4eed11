use crate::screens::HelpScreen;
use crate::state::{AppState, HomeTab};
use crate::ui::widgets::display_value;
use onboard_core::FieldKey;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use strum::IntoEnumIterator;

const WELCOME_TEXT: &str = "Welcome! Please Go to Chat and save your information.";

pub fn render_tabs(frame: &mut Frame, current: HomeTab, area: Rect) {
    let titles: Vec<String> = HomeTab::iter().map(|tab| tab.to_string()).collect();
    let selected = HomeTab::iter().position(|tab| tab == current).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Saved information, or a welcome prompt before the first save
pub fn render_home(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Home");

    let Some(record) = state.saved_record.as_ref().filter(|r| r.contains(FieldKey::Name)) else {
        frame.render_widget(
            Paragraph::new(WELCOME_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Saved Information:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    for field in FieldKey::ALL {
        let value = record.get(field).unwrap_or("");
        // Attachments are listed only when present
        if field.is_attachment() && value.is_empty() {
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", field.label()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(display_value(field, value)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

/// Grid of service entries
pub fn render_help(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Help");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let services = HelpScreen::services();
    let rows = services.len().div_ceil(HelpScreen::COLUMNS);
    let mut constraints = vec![Constraint::Length(3); rows];
    constraints.push(Constraint::Min(0));
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, chunk) in services.chunks(HelpScreen::COLUMNS).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, HelpScreen::COLUMNS as u32); HelpScreen::COLUMNS])
            .split(row_areas[row]);
        for (col, service) in chunk.iter().enumerate() {
            let idx = row * HelpScreen::COLUMNS + col;
            let style = if idx == state.help.selected() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(service.to_string())
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).border_style(style)),
                cells[col],
            );
        }
    }

    if let Some(chosen) = state.help.last_chosen() {
        let footer = row_areas[rows];
        frame.render_widget(
            Paragraph::new(format!("Selected: {}", chosen)).style(Style::default().fg(Color::Green)),
            footer,
        );
    }
}
