//! Login handshake tests.

use std::sync::Arc;

use facecloud_client::{AuthState, ClientError, MemorySettings, SettingsStore};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::*;

fn token_response(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {"access_token": token},
        "status_code": 200
    }))
}

#[tokio::test]
async fn test_credentials_login_posts_json() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "user@example.com", "password": "hunter2"})))
        .respond_with(token_response("abc123"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Arc::new(MemorySettings::default());
    let client = client_with(&server, Arc::clone(&settings)).await;

    let transitioned = assert_ok!(client.login_with_credentials("user@example.com", "hunter2").await);
    assert!(transitioned);
    assert_eq!(client.auth_state(), AuthState::Authenticated);
    assert!(client.requires_auth().await);
    assert_eq!(client.auth_header_value().await.as_deref(), Some("Bearer abc123"));

    // Stored without the scheme prefix.
    assert_eq!(settings.token(), "abc123");
}

#[tokio::test]
async fn test_second_login_is_noop() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(token_response("first"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(assert_ok!(client.login_with_credentials("a@b.c", "pw").await));
    assert!(!assert_ok!(client.login_with_credentials("a@b.c", "pw").await));
    assert!(!assert_ok!(client.login_with_token("other").await));
    assert_eq!(client.auth_header_value().await.as_deref(), Some("Bearer first"));
}

#[tokio::test]
async fn test_existing_stored_token_not_overwritten() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(token_response("fresh"))
        .mount(&server)
        .await;

    let settings = Arc::new(MemorySettings::default());
    settings.set_token("stale");
    let client = client_with(&server, Arc::clone(&settings)).await;

    assert_ok!(client.login_with_credentials("a@b.c", "pw").await);
    assert_eq!(settings.token(), "stale");
    assert_eq!(client.auth_header_value().await.as_deref(), Some("Bearer fresh"));
}

#[tokio::test]
async fn test_missing_access_token_is_auth_error() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid credentials",
            "status_code": 401
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = assert_err!(client.login_with_credentials("a@b.c", "wrong").await);
    assert!(err.is_auth());
    assert_eq!(client.auth_state(), AuthState::Anonymous);
    assert!(client.auth_header_value().await.is_none());
}

#[tokio::test]
async fn test_non_json_rejection_is_auth_error() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = assert_err!(client.login_with_credentials("a@b.c", "pw").await);
    assert!(matches!(err, ClientError::Auth(_)));
    let message = err.to_string();
    assert!(message.contains("403"));
    assert!(message.contains("Forbidden"));
}

#[tokio::test]
async fn test_empty_credentials_rejected_without_request() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(token_response("never"))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = assert_err!(client.login_with_credentials("", "pw").await);
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_token_login_makes_no_request() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(token_response("never"))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(assert_ok!(client.login_with_token("ready-token").await));
    assert_eq!(
        client.auth_header_value().await.as_deref(),
        Some("Bearer ready-token")
    );
}

#[tokio::test]
async fn test_login_from_settings_prefers_token() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(token_response("never"))
        .expect(0)
        .mount(&server)
        .await;

    let settings = Arc::new(MemorySettings::default());
    settings.set_token("stored");
    settings.set_email("a@b.c");
    settings.set_password("pw");
    let client = client_with(&server, settings).await;

    assert!(assert_ok!(client.login_from_settings().await));
    assert_eq!(client.auth_header_value().await.as_deref(), Some("Bearer stored"));
}

#[tokio::test]
async fn test_login_from_settings_uses_credentials() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({"email": "a@b.c", "password": "pw"})))
        .respond_with(token_response("from-credentials"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Arc::new(MemorySettings::default());
    settings.set_email("a@b.c");
    settings.set_password("pw");
    let client = client_with(&server, Arc::clone(&settings)).await;

    assert!(assert_ok!(client.login_from_settings().await));
    assert_eq!(settings.token(), "from-credentials");
}

#[tokio::test]
async fn test_login_from_empty_settings_stays_anonymous() {
    let server = server_with_catalog().await;
    let client = client_for(&server).await;

    assert!(!assert_ok!(client.login_from_settings().await));
    assert_eq!(client.auth_state(), AuthState::Anonymous);
}
