use crossterm::event::KeyCode;
use onboard_auth::LoginForm;
use onboard_client::LoginRequest;
use std::time::Instant;

use crate::input::{FieldFocus, TextField};

/// Focusable elements of the login screen, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Captcha,
    RefreshCaptcha,
    Submit,
    Signup,
}

impl LoginFocus {
    const ORDER: [LoginFocus; 6] = [
        LoginFocus::Email,
        LoginFocus::Password,
        LoginFocus::Captcha,
        LoginFocus::RefreshCaptcha,
        LoginFocus::Submit,
        LoginFocus::Signup,
    ];
}

/// What the app should do after a key on the login screen
#[derive(Debug, Clone, PartialEq)]
pub enum LoginAction {
    None,
    Submit(LoginRequest),
    OpenSignup,
}

#[derive(Debug, Clone)]
pub struct LoginScreen {
    pub email: TextField,
    pub password: TextField,
    pub captcha: TextField,
    pub form: LoginForm,
    focus: FieldFocus,
    in_flight: bool,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new(LoginForm::new())
    }
}

impl LoginScreen {
    pub fn new(form: LoginForm) -> Self {
        Self {
            email: TextField::new("Email"),
            password: TextField::new("Password").masked(),
            captcha: TextField::new("Enter CAPTCHA"),
            form,
            focus: FieldFocus::new(LoginFocus::ORDER.len()),
            in_flight: false,
        }
    }

    pub fn focus(&self) -> LoginFocus {
        LoginFocus::ORDER[self.focus.index()]
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus() {
            LoginFocus::Email => Some(&mut self.email),
            LoginFocus::Password => Some(&mut self.password),
            LoginFocus::Captcha => Some(&mut self.captcha),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> LoginAction {
        if self.in_flight {
            return LoginAction::None;
        }

        match key {
            KeyCode::Tab | KeyCode::Down => self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus.previous(),
            KeyCode::Enter => return self.activate(),
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_field() {
                    field.buffer.insert_char(c);
                    self.sync_captcha();
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field() {
                    field.buffer.backspace();
                    self.sync_captcha();
                }
            }
            KeyCode::Left => {
                if let Some(field) = self.focused_field() {
                    field.buffer.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.focused_field() {
                    field.buffer.move_right();
                }
            }
            _ => {}
        }
        LoginAction::None
    }

    fn sync_captcha(&mut self) {
        if self.focus() == LoginFocus::Captcha {
            self.form.set_entered_captcha(self.captcha.value());
        }
    }

    fn activate(&mut self) -> LoginAction {
        match self.focus() {
            LoginFocus::RefreshCaptcha => {
                self.form.refresh_captcha();
                self.form.set_entered_captcha(self.captcha.value());
                LoginAction::None
            }
            LoginFocus::Signup => LoginAction::OpenSignup,
            // Enter on any input or the button submits
            _ => self.submit(),
        }
    }

    fn submit(&mut self) -> LoginAction {
        self.form.email = self.email.value().trim().to_string();
        self.form.password = self.password.value().to_string();
        self.form.set_entered_captcha(self.captcha.value());
        match self.form.check_captcha() {
            Ok(()) => {
                self.in_flight = true;
                LoginAction::Submit(self.form.request())
            }
            Err(_) => LoginAction::None,
        }
    }

    /// Apply the outcome of the spawned login call
    pub fn finish(&mut self, result: Result<(), &'static str>, now: Instant) {
        self.in_flight = false;
        if let Err(notice) = result {
            self.form.show_error(notice, now);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.form.expire_error(now);
    }

    /// Reset for the next visit, with a fresh challenge
    pub fn reset(&mut self) {
        *self = Self::new(LoginForm::new());
    }
}
