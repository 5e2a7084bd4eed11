use crossterm::event::KeyCode;
use tracing::info;

use crate::input::{FieldFocus, TextField};

const FIELD_COUNT: usize = 3;
/// Fields plus the Sign Up button and the back-to-login link
const FOCUS_COUNT: usize = FIELD_COUNT + 2;
const SUBMIT_INDEX: usize = FIELD_COUNT;
const BACK_INDEX: usize = FIELD_COUNT + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Pending,
    /// Account details accepted locally; carries the confirmation notice
    Registered(String),
    BackToLogin,
}

/// Registration form. The service exposes no signup endpoint, so a valid
/// submission is only confirmed locally before returning to login.
#[derive(Debug, Clone)]
pub struct SignupScreen {
    pub fields: [TextField; FIELD_COUNT],
    focus: FieldFocus,
    error: Option<String>,
}

impl Default for SignupScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupScreen {
    pub fn new() -> Self {
        Self {
            fields: [
                TextField::new("Name"),
                TextField::new("Email"),
                TextField::new("Password").masked(),
            ],
            focus: FieldFocus::new(FOCUS_COUNT),
            error: None,
        }
    }

    pub fn focus_index(&self) -> usize {
        self.focus.index()
    }

    pub fn is_submit_focused(&self) -> bool {
        self.focus.index() == SUBMIT_INDEX
    }

    pub fn is_back_focused(&self) -> bool {
        self.focus.index() == BACK_INDEX
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> SignupOutcome {
        match key {
            KeyCode::Esc => return SignupOutcome::BackToLogin,
            KeyCode::Tab | KeyCode::Down => self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus.previous(),
            KeyCode::Enter if self.is_back_focused() => return SignupOutcome::BackToLogin,
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) => {
                if let Some(field) = self.fields.get_mut(self.focus.index()) {
                    field.buffer.insert_char(c);
                    self.error = None;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus.index()) {
                    field.buffer.backspace();
                }
            }
            _ => {}
        }
        SignupOutcome::Pending
    }

    fn submit(&mut self) -> SignupOutcome {
        if let Some(empty) = self.fields.iter().find(|f| f.value().trim().is_empty()) {
            self.error = Some(format!("{} is required", empty.label));
            return SignupOutcome::Pending;
        }
        let email = self.fields[1].value().trim();
        if !email.contains('@') {
            self.error = Some("Please enter a valid email".to_string());
            return SignupOutcome::Pending;
        }

        info!("Signup details captured for {}", email);
        SignupOutcome::Registered(format!("Account details saved for {email}. Please log in."))
    }
}
