use onboard_client::{ApiClient, ClientError, LoginRequest};
use onboard_core::{FieldKey, FlowError, FormRecord, RecordSink};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record() -> FormRecord {
    let mut record = FormRecord::new();
    record.set(FieldKey::Name, "Alice");
    record.set(FieldKey::Phone, "9876543210");
    record
}

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client
        .login(&LoginRequest::new("a@b.com", "secret"))
        .await
        .unwrap();

    assert_eq!(response.token, "abc123");
}

#[tokio::test]
async fn test_login_rejected_carries_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client
        .login(&LoginRequest::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Invalid credentials"));
}

#[tokio::test]
async fn test_login_without_token_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": "a"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client
        .login(&LoginRequest::new("a@b.com", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_save_posts_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/save-user-data"))
        .and(body_json(json!({
            "name": "Alice",
            "qualification": "",
            "phone": "9876543210",
            "dob": "",
            "about": "",
            "skills": "",
            "profilePhoto": "",
            "document": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    client.save_user_data(&record()).await.unwrap();
}

#[tokio::test]
async fn test_record_sink_maps_failures_to_network_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/save-user-data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.save_record(&record()).await.unwrap_err();

    assert!(matches!(err, FlowError::NetworkFailure { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Port 9 (discard) is closed on test machines
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = client.save_user_data(&record()).await.unwrap_err();

    assert!(err.is_network_error());
}
