//! HTTP transport with a per-call response window.
//!
//! Each call owns its request and its future. When the window elapses the
//! future is dropped, so a late completion has nowhere to write and cannot
//! leak into the next call.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::content::ContentType;
use crate::error::{ClientError, ClientResult};
use crate::metrics::{record_request, record_timeout};

/// Request payload.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Bytes(Vec<u8>),
    Json(Value),
    Multipart(Form),
}

/// A single outgoing request, built fresh for every call.
#[derive(Debug)]
pub struct HttpRequest {
    /// Operation label used in logs and metrics
    pub operation: &'static str,
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(operation: &'static str, method: Method, url: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(operation: &'static str, url: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, url)
    }

    pub fn post(operation: &'static str, url: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, url)
    }

    /// Set the `Content-Type` header. `ContentType::None` leaves it unset.
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        if let Some(mime) = content_type.mime() {
            self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime));
        }
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Response as received; a non-success status is not an error here.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> ClientResult<Value> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::malformed(format!("{} returned a non-JSON body: {}", self.url, e))
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests and waits for each one up to the configured window.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    timeout: Duration,
}

impl Transport {
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("facecloud-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Send a request and wait for the full response.
    ///
    /// Returns [`ClientError::Timeout`] when nothing arrives within the
    /// window. HTTP error statuses are logged and returned as responses.
    pub async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let HttpRequest {
            operation,
            method,
            url,
            headers,
            body,
        } = request;

        debug!(operation, %method, %url, "Sending request");

        let mut builder = self.http.request(method, &url).headers(headers);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Bytes(bytes) => builder.body(bytes),
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let started = Instant::now();
        let call = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?.to_vec();
            Ok::<_, ClientError>((status, body))
        };

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok((status, body))) => {
                record_request(operation, status.as_u16(), started.elapsed());
                if !status.is_success() {
                    warn!(
                        operation,
                        %url,
                        status = status.as_u16(),
                        reason = status.canonical_reason().unwrap_or(""),
                        "Request returned non-success status"
                    );
                }
                Ok(HttpResponse { status, url, body })
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                record_timeout(operation);
                let ms = self.timeout.as_millis() as u64;
                debug!(operation, %url, timeout_ms = ms, "Request abandoned after timeout");
                Err(ClientError::Timeout(ms))
            }
        }
    }
}
