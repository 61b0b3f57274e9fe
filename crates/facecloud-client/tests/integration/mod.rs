//! Integration tests for the FaceCloud client.
//!
//! Each test starts its own `wiremock` server publishing an API description,
//! so tests share no state.

pub mod auth_tests;
pub mod catalog_tests;
pub mod transport_tests;

use std::io::Write;
use std::sync::Arc;

use facecloud_client::{FaceClient, FaceClientConfig, MemorySettings, SettingsStore};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DESCRIPTION_PATH: &str = "/api/v1/openapi.json";
pub const LOGIN_PATH: &str = "/api/v1/login";
pub const DETECT_PATH: &str = "/api/v1/detect";
pub const MATCH_PATH: &str = "/api/v1/match";

pub const JPEG_BYTES: &[u8] = b"fake-jpeg-payload";

pub fn description() -> Value {
    json!({
        "openapi": "3.0.0",
        "paths": {
            (LOGIN_PATH): {"post": {}},
            (DETECT_PATH): {"post": {}},
            (MATCH_PATH): {"post": {}},
            "/api/v1/persons/{p_id}": {"get": {}},
            "/api/v1/databases": {"get": {}}
        }
    })
}

/// Mock server publishing [`description`].
pub async fn server_with_catalog() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DESCRIPTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(description()))
        .mount(&server)
        .await;
    server
}

pub fn config_for(server: &MockServer) -> FaceClientConfig {
    FaceClientConfig {
        base_url: server.uri(),
        ..Default::default()
    }
}

pub async fn client_with(server: &MockServer, settings: Arc<MemorySettings>) -> FaceClient {
    let settings: Arc<dyn SettingsStore> = settings;
    FaceClient::new(config_for(server), settings)
        .await
        .expect("Failed to create client")
}

pub async fn client_for(server: &MockServer) -> FaceClient {
    client_with(server, Arc::new(MemorySettings::default())).await
}

/// Temporary file holding a fake JPEG.
pub fn jpeg_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".jpg")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(JPEG_BYTES).expect("Failed to write temp file");
    file
}

pub fn detection_body() -> Value {
    json!({
        "data": [{
            "bbox": {"x": 12, "y": 24, "width": 100, "height": 120},
            "landmarks": [{"x": 30.5, "y": 40.0}, {"x": 60.0, "y": 41.5}],
            "attributes": {"glasses": "none", "smile": "yes"},
            "demographics": {
                "age": {"mean": 28.0, "variance": 2.5},
                "gender": "male",
                "ethnicity": "east_asian"
            }
        }],
        "status_code": 200
    })
}
