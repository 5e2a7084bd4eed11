use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use onboard_auth::{FileTokenStore, LoginService, TokenStore, AUTH_TOKEN_KEY};
use onboard_client::ApiClient;
use onboard_core::{
    Control, FieldKey, FlowError, FlowResult, FormRecord, RecordSink, StepDefinition, StepTable,
};
use onboard_tui::state::SHAKE_TICKS;
use onboard_tui::{App, AppEvent, AppOptions, AppServices, HomeTab, Screen};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingSink {
    saved: Mutex<Vec<FormRecord>>,
    fail: bool,
}

#[async_trait]
impl RecordSink for RecordingSink {
    async fn save_record(&self, record: &FormRecord) -> FlowResult<()> {
        if self.fail {
            return Err(FlowError::network("save-user-data", "connection refused"));
        }
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }
}

fn short_table() -> StepTable {
    StepTable::new(vec![
        StepDefinition::text(FieldKey::Name, "What is your name?"),
        StepDefinition::menu(FieldKey::Qualification, "Qualification?", ["B.Tech", "B.E"]),
        StepDefinition::final_step("Review your answers."),
    ])
    .unwrap()
}

fn options() -> AppOptions {
    AppOptions {
        steps: short_table(),
        error_clear_delay: Duration::from_millis(10),
        splash_ticks: 2,
        tick_rate_ms: 250,
    }
}

struct Harness {
    app: App,
    events: UnboundedReceiver<AppEvent>,
    store: Arc<FileTokenStore>,
    sink: Arc<RecordingSink>,
    _dir: TempDir,
}

fn harness(base_url: &str, sink: RecordingSink) -> Harness {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileTokenStore::new(dir.path().join("token.json")));
    let sink = Arc::new(sink);
    let services = AppServices {
        login: LoginService::new(ApiClient::new(base_url).unwrap(), store.clone()),
        records: sink.clone(),
    };
    let (tx, rx) = mpsc::unbounded_channel();
    Harness {
        app: App::new(&options(), services, tx),
        events: rx,
        store,
        sink,
        _dir: dir,
    }
}

impl Harness {
    fn press(&mut self, code: KeyCode) {
        self.app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Deliver the next event produced by a spawned task
    async fn pump(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("timed out waiting for app event")
            .expect("event channel closed");
        self.app.handle_event(event);
    }
}

#[tokio::test]
async fn test_splash_advances_on_ticks() {
    let mut h = harness("http://127.0.0.1:9", RecordingSink::default());
    assert_eq!(h.app.state.screen, Screen::Splash);

    h.app.handle_event(AppEvent::Tick);
    assert_eq!(h.app.state.screen, Screen::Splash);
    h.app.handle_event(AppEvent::Tick);
    assert_eq!(h.app.state.screen, Screen::Login);
}

#[tokio::test]
async fn test_login_reaches_home_and_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-9"})))
        .mount(&server)
        .await;
    let mut h = harness(&server.uri(), RecordingSink::default());

    h.press(KeyCode::Enter);
    assert_eq!(h.app.state.screen, Screen::Login);

    let code = h.app.state.login.form.captcha().code().to_string();
    h.type_text("a@b.com");
    h.press(KeyCode::Tab);
    h.type_text("pw");
    h.press(KeyCode::Tab);
    h.type_text(&code);
    h.press(KeyCode::Enter);
    assert!(h.app.state.login.is_in_flight());

    h.pump().await;

    assert_eq!(h.app.state.screen, Screen::Home(HomeTab::Home));
    assert_eq!(h.app.state.session.user(), Some("a@b.com"));
    assert_eq!(
        h.store.get_item(AUTH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("tok-9")
    );
}

#[tokio::test]
async fn test_rejected_login_stays_on_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad"})))
        .mount(&server)
        .await;
    let mut h = harness(&server.uri(), RecordingSink::default());
    h.press(KeyCode::Enter);

    let code = h.app.state.login.form.captcha().code().to_string();
    h.press(KeyCode::Tab);
    h.press(KeyCode::Tab);
    h.type_text(&code);
    h.press(KeyCode::Enter);
    h.pump().await;

    assert_eq!(h.app.state.screen, Screen::Login);
    assert_eq!(h.app.state.login.form.error_message(), Some("Error in Login"));
    assert!(!h.app.state.session.is_authenticated());
}

#[tokio::test]
async fn test_blank_answer_shakes_then_clears() {
    let mut h = harness("http://127.0.0.1:9", RecordingSink::default());
    h.app.state.screen = Screen::Home(HomeTab::Chat);

    h.press(KeyCode::Enter);
    assert_eq!(h.app.state.chat.shake_ticks, SHAKE_TICKS);
    assert_eq!(
        h.app.state.chat.flow.pending_error().map(|e| e.message.as_str()),
        Some("Please fill the field.")
    );

    h.pump().await;
    assert_eq!(h.app.state.chat.flow.pending_error(), None);

    for _ in 0..SHAKE_TICKS {
        h.app.handle_event(AppEvent::Tick);
    }
    assert!(!h.app.state.chat.is_shaking());
}

#[tokio::test]
async fn test_chat_walkthrough_saves_and_updates_home() {
    let mut h = harness("http://127.0.0.1:9", RecordingSink::default());
    h.app.state.screen = Screen::Home(HomeTab::Chat);

    h.type_text("Ada");
    h.press(KeyCode::Enter);
    assert!(h.app.state.chat.input.is_empty());
    assert_eq!(
        h.app.state.chat.control(),
        Control::MenuButtons(vec!["B.Tech".to_string(), "B.E".to_string()])
    );

    h.press(KeyCode::Right);
    h.press(KeyCode::Enter);
    assert_eq!(
        h.app.state.chat.control(),
        Control::Review {
            choosing_field: false
        }
    );

    // [Edit Information] [Save]
    h.press(KeyCode::Right);
    h.press(KeyCode::Enter);
    assert_eq!(h.app.state.chat.control(), Control::Disabled);

    h.pump().await;

    let alert = h.app.state.alert.clone().expect("alert shown");
    assert_eq!(alert.title, "Success");
    let saved = h.app.state.saved_record.clone().expect("record kept for Home");
    assert_eq!(saved.get(FieldKey::Name), Some("Ada"));
    assert_eq!(saved.get(FieldKey::Qualification), Some("B.E"));
    assert_eq!(h.sink.saved.lock().unwrap().len(), 1);

    h.press(KeyCode::Enter);
    assert!(h.app.state.alert.is_none());
}

#[tokio::test]
async fn test_failed_save_keeps_home_empty() {
    let sink = RecordingSink {
        fail: true,
        ..Default::default()
    };
    let mut h = harness("http://127.0.0.1:9", sink);
    h.app.state.screen = Screen::Home(HomeTab::Chat);

    h.type_text("Ada");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);
    h.press(KeyCode::Right);
    h.press(KeyCode::Enter);
    h.pump().await;

    assert_eq!(h.app.state.alert.as_ref().map(|a| a.title.as_str()), Some("Error"));
    assert_eq!(h.app.state.saved_record, None);
    assert_eq!(
        h.app.state.chat.control(),
        Control::Review {
            choosing_field: false
        }
    );
}

#[tokio::test]
async fn test_edit_detour_from_review() {
    let mut h = harness("http://127.0.0.1:9", RecordingSink::default());
    h.app.state.screen = Screen::Home(HomeTab::Chat);

    h.type_text("Ada");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);

    // Edit Information, then the first field button (Name)
    h.press(KeyCode::Enter);
    assert_eq!(
        h.app.state.chat.review_buttons(),
        vec!["Name".to_string(), "Qualification".to_string()]
    );
    h.press(KeyCode::Enter);
    assert_eq!(h.app.state.chat.control(), Control::TextBox);

    h.type_text("Grace");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.state.chat.flow.record().get(FieldKey::Name), Some("Grace"));
    assert!(matches!(
        h.app.state.chat.control(),
        Control::Review { .. }
    ));
}

#[tokio::test]
async fn test_tab_cycles_home_tabs() {
    let mut h = harness("http://127.0.0.1:9", RecordingSink::default());
    h.app.state.screen = Screen::Home(HomeTab::Home);

    h.press(KeyCode::Tab);
    assert_eq!(h.app.state.screen, Screen::Home(HomeTab::Chat));
    h.press(KeyCode::Tab);
    assert_eq!(h.app.state.screen, Screen::Home(HomeTab::Help));
    h.press(KeyCode::Tab);
    assert_eq!(h.app.state.screen, Screen::Home(HomeTab::Home));
}

#[tokio::test]
async fn test_stray_save_completion_leaves_home_empty() {
    let mut h = harness("http://127.0.0.1:9", RecordingSink::default());
    h.app.state.screen = Screen::Home(HomeTab::Chat);
    h.type_text("Ada");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);

    h.app
        .dispatch_flow(onboard_core::FlowEvent::SaveCompleted(Ok(())));

    assert_eq!(h.app.state.saved_record, None);
    assert!(h.app.state.alert.is_none());
}
