use crate::events::{AppEvent, EventHandler};
use crate::date_picker::DatePicker;
use crate::file_picker::{load_picked_file, FilePicker};
use crate::screens::{LoginAction, SignupOutcome};
use crate::state::{AppOptions, AppState, HomeTab, Screen, SHAKE_TICKS};
use crate::ui;
use crate::ui::widgets::AlertDialog;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use onboard_auth::LoginService;
use onboard_client::LoginRequest;
use onboard_core::{Control, Effect, FileFilter, FlowEvent, PickOutcome, RecordSink};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

/// Network collaborators used by the screens
#[derive(Clone)]
pub struct AppServices {
    pub login: LoginService,
    pub records: Arc<dyn RecordSink>,
}

/// Main TUI application struct
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    services: AppServices,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(options: &AppOptions, services: AppServices, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            state: AppState::new(options),
            should_quit: false,
            services,
            events,
        }
    }

    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_handler: &mut EventHandler,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            match event_handler.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key_event(key),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Flow(event) => self.dispatch_flow(event),
            AppEvent::LoginFinished { email, result } => self.on_login_finished(email, result),
            AppEvent::Quit => self.quit(),
        }
    }

    fn on_tick(&mut self) {
        if self.state.screen == Screen::Splash {
            self.state.splash_remaining = self.state.splash_remaining.saturating_sub(1);
            if self.state.splash_remaining == 0 {
                self.state.go_to_login();
            }
        }
        self.state.chat.shake_ticks = self.state.chat.shake_ticks.saturating_sub(1);
        self.state.login.tick(Instant::now());
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return self.quit(),
                KeyCode::Char('l') if matches!(self.state.screen, Screen::Home(_)) => {
                    return self.logout()
                }
                _ => {}
            }
        }

        if self.state.alert.is_some() {
            if AlertDialog::dismisses(key.code) {
                self.state.alert = None;
            }
            return;
        }

        match self.state.screen {
            Screen::Splash => self.state.go_to_login(),
            Screen::Login => self.handle_login_key(key.code),
            Screen::Signup => match self.state.signup.handle_key(key.code) {
                SignupOutcome::Pending => {}
                SignupOutcome::Registered(notice) => {
                    self.state.notice = Some(notice);
                    self.state.signup = Default::default();
                    self.state.go_to_login();
                }
                SignupOutcome::BackToLogin => self.state.go_to_login(),
            },
            Screen::Home(tab) => {
                // Popups own every key while open
                if tab == HomeTab::Chat && self.state.chat.has_popup() {
                    return self.handle_popup_key(key.code);
                }
                if key.code == KeyCode::Tab {
                    return self.state.next_tab();
                }
                match tab {
                    HomeTab::Home => {}
                    HomeTab::Chat => self.handle_chat_key(key.code),
                    HomeTab::Help => self.state.help.handle_key(key.code),
                }
            }
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        match self.state.login.handle_key(key) {
            LoginAction::None => {}
            LoginAction::OpenSignup => {
                self.state.notice = None;
                self.state.screen = Screen::Signup;
            }
            LoginAction::Submit(request) => self.spawn_login(request),
        }
    }

    fn spawn_login(&self, request: LoginRequest) {
        let service = self.services.login.clone();
        let events = self.events.clone();
        info!("Logging in as {}", request.email);
        tokio::spawn(async move {
            let result = service
                .login(&request)
                .await
                .map(|_| ())
                .map_err(|e| e.user_message());
            let _ = events.send(AppEvent::LoginFinished {
                email: request.email,
                result,
            });
        });
    }

    fn on_login_finished(&mut self, email: String, result: Result<(), &'static str>) {
        let succeeded = result.is_ok();
        self.state.login.finish(result, Instant::now());
        if succeeded {
            info!("Login succeeded for {}", email);
            self.state.session.login_success(email);
            self.state.notice = None;
            self.state.screen = Screen::Home(HomeTab::Home);
        } else {
            warn!("Login failed for {}", email);
        }
    }

    fn logout(&mut self) {
        let service = self.services.login.clone();
        tokio::spawn(async move {
            if let Err(e) = service.logout().await {
                debug!("No stored token to remove: {}", e);
            }
        });
        self.state.session.logout();
        self.state.go_to_login();
    }

    fn handle_chat_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::PageUp => return self.state.scroll_back(),
            KeyCode::PageDown => return self.state.scroll_forward(),
            _ => {}
        }

        match self.state.chat.control() {
            Control::TextBox => self.handle_text_key(key),
            Control::MenuButtons(options) => {
                if let Some(option) = self.select_button(key, options.len()) {
                    if let Some(choice) = options.get(option) {
                        self.dispatch_flow(FlowEvent::MenuSelected(choice.clone()));
                    }
                }
            }
            Control::DatePicker { max } => {
                if key == KeyCode::Enter {
                    let today = Local::now().date_naive();
                    self.state.chat.date_picker = Some(DatePicker::new(today, max));
                }
            }
            Control::FilePicker(filter) => {
                if key == KeyCode::Enter {
                    let base = std::env::current_dir()
                        .ok()
                        .or_else(dirs::home_dir)
                        .unwrap_or_default();
                    self.state.chat.file_picker = Some(FilePicker::new(filter, base));
                }
            }
            Control::Review { choosing_field } => {
                let count = self.state.chat.review_buttons().len();
                if let Some(choice) = self.select_button(key, count) {
                    let event = if choosing_field {
                        self.state.chat.selected_field().map(FlowEvent::BeginEdit)
                    } else if choice == 0 {
                        Some(FlowEvent::RequestEdit)
                    } else {
                        Some(FlowEvent::SaveRequested)
                    };
                    if let Some(event) = event {
                        self.dispatch_flow(event);
                    }
                }
            }
            Control::Disabled => {}
        }
    }

    /// Move the highlight with ←/→; returns the chosen index on Enter
    fn select_button(&mut self, key: KeyCode, count: usize) -> Option<usize> {
        let chat = &mut self.state.chat;
        if count == 0 {
            return None;
        }
        match key {
            KeyCode::Left => chat.selection = (chat.selection + count - 1) % count,
            KeyCode::Right => chat.selection = (chat.selection + 1) % count,
            KeyCode::Enter => return Some(chat.selection.min(count - 1)),
            _ => {}
        }
        None
    }

    fn handle_text_key(&mut self, key: KeyCode) {
        let input = &mut self.state.chat.input;
        match key {
            KeyCode::Char(c) => input.insert_char(c),
            KeyCode::Backspace => {
                input.backspace();
            }
            KeyCode::Delete => {
                input.delete_char();
            }
            KeyCode::Left => {
                input.move_left();
            }
            KeyCode::Right => {
                input.move_right();
            }
            KeyCode::Home => input.move_to_start(),
            KeyCode::End => input.move_to_end(),
            KeyCode::Esc => input.clear(),
            KeyCode::Enter => {
                let text = input.content().to_string();
                self.dispatch_flow(FlowEvent::Submit(text));
            }
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyCode) {
        let chat = &mut self.state.chat;
        if let Some(picker) = chat.date_picker.as_mut() {
            if let Some(outcome) = picker.handle_key(key) {
                chat.date_picker = None;
                self.dispatch_flow(FlowEvent::DatePicked(outcome));
            }
            return;
        }

        if let Some(picker) = chat.file_picker.as_mut() {
            let filter = picker.filter();
            if let Some(outcome) = picker.handle_key(key) {
                chat.file_picker = None;
                match outcome {
                    PickOutcome::Picked(path) => self.spawn_file_load(path, filter),
                    PickOutcome::Cancelled => self.dispatch_flow(pick_event(filter, PickOutcome::Cancelled)),
                    PickOutcome::Failed(message) => {
                        self.dispatch_flow(pick_event(filter, PickOutcome::Failed(message)))
                    }
                }
            }
        }
    }

    fn spawn_file_load(&mut self, path: std::path::PathBuf, filter: FileFilter) {
        self.state.chat.loading_file = true;
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = load_picked_file(&path, filter).await;
            let _ = events.send(AppEvent::Flow(pick_event(filter, outcome)));
        });
    }

    /// Feed one event to the flow and carry out what it asks for
    pub fn dispatch_flow(&mut self, event: FlowEvent) {
        if matches!(event, FlowEvent::ImagePicked(_) | FlowEvent::DocumentPicked(_)) {
            self.state.chat.loading_file = false;
        }

        let chat = &mut self.state.chat;
        let saved =
            matches!(event, FlowEvent::SaveCompleted(Ok(()))) && chat.flow.state().save_in_flight;
        let step_before = chat.flow.current_step_index();
        let mode_before = chat.flow.mode().clone();
        let choosing_before = chat.flow.state().choosing_field;

        let effects = chat.flow.handle(event);

        if chat.flow.input().is_empty() {
            chat.input.clear();
        }
        if chat.flow.current_step_index() != step_before
            || *chat.flow.mode() != mode_before
            || chat.flow.state().choosing_field != choosing_before
        {
            chat.selection = 0;
            chat.scroll_offset = 0;
        }

        if saved {
            // Home shows exactly what was persisted
            self.state.saved_record = Some(chat.flow.record().clone());
        }

        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Shake => self.state.chat.shake_ticks = SHAKE_TICKS,
            Effect::ScheduleErrorClear { generation, after } => {
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = events.send(AppEvent::Flow(FlowEvent::ErrorTimerFired { generation }));
                });
            }
            Effect::Persist(record) => {
                let sink = Arc::clone(&self.services.records);
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = sink.save_record(&record).await.map_err(|e| {
                        error!("Save failed: {}", e);
                        e.to_string()
                    });
                    let _ = events.send(AppEvent::Flow(FlowEvent::SaveCompleted(result)));
                });
            }
            Effect::Alert { title, message } => {
                self.state.alert = Some(AlertDialog::new(title, message));
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn pick_event(
    filter: FileFilter,
    outcome: PickOutcome<onboard_core::PickedFile>,
) -> FlowEvent {
    match filter {
        FileFilter::Images => FlowEvent::ImagePicked(outcome),
        FileFilter::Pdf => FlowEvent::DocumentPicked(outcome),
    }
}
