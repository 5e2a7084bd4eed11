use onboard_auth::AuthSession;
use onboard_core::{Control, FieldKey, FormRecord, OnboardingFlow, StepTable};
use std::time::Duration;
use strum_macros::{Display, EnumIter};

use crate::date_picker::DatePicker;
use crate::file_picker::FilePicker;
use crate::input::InputBuffer;
use crate::screens::{HelpScreen, LoginScreen, SignupScreen};
use crate::ui::widgets::AlertDialog;

/// Ticks a rejected answer keeps the input border flashing
pub const SHAKE_TICKS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Login,
    Signup,
    Home(HomeTab),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum HomeTab {
    Home,
    Chat,
    Help,
}

impl HomeTab {
    pub fn next(self) -> Self {
        match self {
            HomeTab::Home => HomeTab::Chat,
            HomeTab::Chat => HomeTab::Help,
            HomeTab::Help => HomeTab::Home,
        }
    }
}

/// Tunables supplied by the binary
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub steps: StepTable,
    pub error_clear_delay: Duration,
    /// Ticks before the splash screen moves on by itself
    pub splash_ticks: u16,
    pub tick_rate_ms: u64,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            steps: StepTable::default(),
            error_clear_delay: onboard_core::constants::DEFAULT_ERROR_CLEAR_DELAY,
            splash_ticks: 8,
            tick_rate_ms: 250,
        }
    }
}

/// Chat-tab state layered over the flow engine
pub struct ChatState {
    pub flow: OnboardingFlow,
    pub input: InputBuffer,
    /// Highlighted menu option or review button
    pub selection: usize,
    pub date_picker: Option<DatePicker>,
    pub file_picker: Option<FilePicker>,
    /// A picked file is being read off disk
    pub loading_file: bool,
    pub shake_ticks: u8,
    pub scroll_offset: usize,
}

impl ChatState {
    pub fn new(steps: StepTable, error_clear_delay: Duration) -> Self {
        Self {
            flow: OnboardingFlow::new(steps).with_error_clear_delay(error_clear_delay),
            input: InputBuffer::new(),
            selection: 0,
            date_picker: None,
            file_picker: None,
            loading_file: false,
            shake_ticks: 0,
            scroll_offset: 0,
        }
    }

    pub fn control(&self) -> Control {
        if self.loading_file {
            return Control::Disabled;
        }
        self.flow.current_control()
    }

    pub fn has_popup(&self) -> bool {
        self.date_picker.is_some() || self.file_picker.is_some()
    }

    /// Buttons on the review step: Edit/Save, or one per editable field
    pub fn review_buttons(&self) -> Vec<String> {
        match self.flow.current_control() {
            Control::Review {
                choosing_field: true,
            } => self
                .flow
                .editable_fields()
                .iter()
                .map(|field| field.label().to_string())
                .collect(),
            _ => vec!["Edit Information".to_string(), "Save".to_string()],
        }
    }

    pub fn selected_field(&self) -> Option<FieldKey> {
        self.flow.editable_fields().get(self.selection).copied()
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_ticks > 0
    }
}

pub struct AppState {
    pub screen: Screen,
    pub splash_remaining: u16,
    pub login: LoginScreen,
    pub signup: SignupScreen,
    pub session: AuthSession,
    pub chat: ChatState,
    pub help: HelpScreen,
    /// Record from the last successful save, shown on the Home tab
    pub saved_record: Option<FormRecord>,
    pub alert: Option<AlertDialog>,
    /// One-line notice carried across screens (e.g. after signup)
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(options: &AppOptions) -> Self {
        Self {
            screen: Screen::Splash,
            splash_remaining: options.splash_ticks,
            login: LoginScreen::default(),
            signup: SignupScreen::new(),
            session: AuthSession::new(),
            chat: ChatState::new(options.steps.clone(), options.error_clear_delay),
            help: HelpScreen::default(),
            saved_record: None,
            alert: None,
            notice: None,
        }
    }

    pub fn go_to_login(&mut self) {
        self.login.reset();
        self.screen = Screen::Login;
    }

    pub fn next_tab(&mut self) {
        if let Screen::Home(tab) = self.screen {
            self.screen = Screen::Home(tab.next());
        }
    }

    /// Scroll the transcript towards older messages
    pub fn scroll_back(&mut self) {
        let max_offset = self.chat.flow.transcript().len().saturating_sub(1);
        if self.chat.scroll_offset < max_offset {
            self.chat.scroll_offset += 1;
        }
    }

    pub fn scroll_forward(&mut self) {
        self.chat.scroll_offset = self.chat.scroll_offset.saturating_sub(1);
    }
}
