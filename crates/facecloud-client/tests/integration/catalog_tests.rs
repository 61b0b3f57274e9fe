//! Endpoint discovery against a mock description document.

use facecloud_client::{ClientError, Operation};
use tokio_test::assert_err;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

#[tokio::test]
async fn test_catalog_fetched_at_construction() {
    let server = server_with_catalog().await;
    let client = client_for(&server).await;

    assert_eq!(client.catalog().len(), 4);
    assert_eq!(client.path(Operation::Login).unwrap(), LOGIN_PATH);
    assert_eq!(client.path(Operation::Detect).unwrap(), DETECT_PATH);
    assert_eq!(client.path(Operation::Match).unwrap(), MATCH_PATH);
    assert_eq!(client.catalog().get("databases"), Some("/api/v1/databases"));
}

#[tokio::test]
async fn test_path_variable_routes_left_out() {
    let server = server_with_catalog().await;
    let client = client_for(&server).await;

    assert!(client
        .catalog()
        .iter()
        .all(|(key, path)| !key.contains('{') && !path.contains("{p_id}")));
}

#[tokio::test]
async fn test_unsupported_operation_not_implemented() {
    let server = server_with_catalog().await;
    let client = client_for(&server).await;

    // Published, yet still refused.
    let err = assert_err!(client.path(Operation::Databases));
    assert!(matches!(err, ClientError::NotImplemented(_)));
}

#[tokio::test]
async fn test_malformed_description_yields_empty_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DESCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.catalog().is_empty());

    let err = assert_err!(client.path(Operation::Detect));
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_missing_description_yields_empty_catalog() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    assert!(client.catalog().is_empty());
    let file = jpeg_file();
    let err = assert_err!(client.detect(file.path()).await);
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_refresh_catalog_replaces_paths() {
    let server = MockServer::start().await;
    let mut client = client_for(&server).await;
    assert!(client.catalog().is_empty());

    Mock::given(method("GET"))
        .and(path(DESCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(description()))
        .mount(&server)
        .await;

    client.refresh_catalog().await;
    assert_eq!(client.path(Operation::Detect).unwrap(), DETECT_PATH);
}
