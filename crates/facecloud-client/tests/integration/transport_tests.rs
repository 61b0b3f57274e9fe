//! Response window and HTTP status handling.

use std::time::Duration;

use facecloud_client::{ClientError, Operation};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use super::*;

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detection_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut client = client_for(&server).await;
    client.set_timeout(Duration::from_millis(50));
    assert_eq!(client.timeout(), Duration::from_millis(50));

    let mut completions = client.subscribe();
    let file = jpeg_file();
    let err = assert_err!(client.detect(file.path()).await);
    assert!(err.is_timeout());
    assert!(matches!(err, ClientError::Timeout(50)));
    assert!(!completions.recv().await.unwrap().updated);
}

#[tokio::test]
async fn test_call_after_timeout_is_independent() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"bbox": {"x": 1, "y": 1, "w": 1, "h": 1}}]}))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(detection_body()))
        .mount(&server)
        .await;

    let mut client = client_for(&server).await;
    client.set_timeout(Duration::from_millis(50));

    let file = jpeg_file();
    assert_err!(client.detect(file.path()).await);

    client.set_timeout(Duration::from_secs(3));
    let document = assert_ok!(client.detect(file.path()).await);
    // The abandoned first response must not surface here.
    assert_eq!(
        document.bounding_box(),
        Some(facecloud_models::FaceRect::new(12, 24, 100, 120))
    );
}

#[tokio::test]
async fn test_error_status_returned_as_document() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Internal error",
            "status_code": 500
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let file = jpeg_file();
    let document = assert_ok!(client.detect(file.path()).await);

    assert_eq!(document.root()["status_code"], 500);
    assert!(document.bounding_box().is_none());
}

#[tokio::test]
async fn test_empty_document_is_not_updated() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut completions = client.subscribe();
    let file = jpeg_file();

    let document = assert_ok!(client.detect(file.path()).await);
    assert!(document.is_empty());
    assert!(!completions.recv().await.unwrap().updated);
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = server_with_catalog().await;
    Mock::given(method("POST"))
        .and(path(DETECT_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let file = jpeg_file();
    let err = assert_err!(client.detect(file.path()).await);
    assert!(matches!(err, ClientError::DataMalformed(_)));
    assert_eq!(client.path(Operation::Detect).unwrap(), DETECT_PATH);
}
