use crate::state::AppState;
use crate::ui::widgets::{
    ButtonRowWidget, ChatWidget, DatePickerWidget, FilePickerWidget, InputWidget,
    ReviewPanelWidget,
};
use onboard_core::Control;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

/// Render the chat tab: transcript on top, the current step's control below
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let chat = &state.chat;
    let control = chat.control();

    let control_height = match control {
        Control::Review { .. } => 14,
        _ => 3,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(control_height)])
        .split(area);

    frame.render_widget(
        ChatWidget::new(chat.flow.transcript().messages()).scroll_offset(chat.scroll_offset),
        chunks[0],
    );

    let error = chat.flow.pending_error().map(|pending| pending.message.as_str());
    match control {
        Control::TextBox => {
            frame.render_widget(
                InputWidget::new(&chat.input)
                    .error(error)
                    .shaking(chat.is_shaking()),
                chunks[1],
            );
        }
        Control::MenuButtons(options) => {
            frame.render_widget(
                ButtonRowWidget::new(&options, chat.selection).title("Choose one"),
                chunks[1],
            );
        }
        Control::DatePicker { .. } => {
            let labels = vec!["Select Date of Birth".to_string()];
            frame.render_widget(
                ButtonRowWidget::new(&labels, 0).title(error.unwrap_or("")),
                chunks[1],
            );
        }
        Control::FilePicker(filter) => {
            let labels = vec![format!("Choose file ({})", filter.extensions().join(", "))];
            frame.render_widget(
                ButtonRowWidget::new(&labels, 0).title(error.unwrap_or("")),
                chunks[1],
            );
        }
        Control::Review { choosing_field } => {
            let review = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(3)])
                .split(chunks[1]);
            frame.render_widget(ReviewPanelWidget::new(chat.flow.record()), review[0]);
            let buttons = chat.review_buttons();
            let title = if choosing_field { "Edit which field?" } else { "" };
            frame.render_widget(
                ButtonRowWidget::new(&buttons, chat.selection).title(title),
                review[1],
            );
        }
        Control::Disabled => {
            frame.render_widget(
                InputWidget::new(&chat.input)
                    .placeholder("Please wait...")
                    .enabled(false),
                chunks[1],
            );
        }
    }

    if let Some(picker) = &chat.date_picker {
        frame.render_widget(DatePickerWidget::new(picker), area);
    }
    if let Some(picker) = &chat.file_picker {
        frame.render_widget(FilePickerWidget::new(picker), area);
    }
}
