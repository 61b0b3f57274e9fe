//! Client configuration.

use std::time::Duration;

use reqwest::header::{
    HeaderName, AUTHORIZATION, PROXY_AUTHENTICATE, PROXY_AUTHORIZATION, WWW_AUTHENTICATE,
};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::settings::SettingsStore;

pub const DEFAULT_BACKEND_URL: &str = "https://backend.facecloud.tevian.ru";
pub const DEFAULT_DESCRIPTION_PATH: &str = "/api/v1/openapi.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);
pub const DEFAULT_AUTH_SCHEME: &str = "Bearer";

/// Header the session token is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthHeader {
    WwwAuthenticate,
    #[default]
    Authorization,
    ProxyAuthenticate,
    ProxyAuthorization,
}

impl AuthHeader {
    pub fn header_name(&self) -> HeaderName {
        match self {
            AuthHeader::WwwAuthenticate => WWW_AUTHENTICATE,
            AuthHeader::Authorization => AUTHORIZATION,
            AuthHeader::ProxyAuthenticate => PROXY_AUTHENTICATE,
            AuthHeader::ProxyAuthorization => PROXY_AUTHORIZATION,
        }
    }
}

/// Configuration for the face client.
#[derive(Debug, Clone)]
pub struct FaceClientConfig {
    /// Base URL of the service backend
    pub base_url: String,
    /// Path of the API description document, relative to `base_url`
    pub description_path: String,
    /// Per-call response window
    pub timeout: Duration,
    /// Scheme prefixed to the token (e.g. "Bearer")
    pub auth_scheme: String,
    /// Header carrying the scheme-prefixed token
    pub auth_header: AuthHeader,
}

impl Default for FaceClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            description_path: DEFAULT_DESCRIPTION_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            auth_header: AuthHeader::default(),
        }
    }
}

impl FaceClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("FACECLOUD_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            description_path: std::env::var("FACECLOUD_API_PATH")
                .unwrap_or_else(|_| DEFAULT_DESCRIPTION_PATH.to_string()),
            timeout: std::env::var("FACECLOUD_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TIMEOUT),
            auth_scheme: std::env::var("FACECLOUD_AUTH_SCHEME")
                .unwrap_or_else(|_| DEFAULT_AUTH_SCHEME.to_string()),
            auth_header: AuthHeader::default(),
        }
    }

    /// Create config from a settings store, keeping defaults for empty values.
    pub fn from_settings(settings: &dyn SettingsStore) -> Self {
        let mut config = Self::default();
        let url = settings.url();
        if !url.is_empty() {
            config.base_url = url;
        }
        let path = settings.path();
        if !path.is_empty() {
            config.description_path = path;
        }
        config
    }

    /// Base URL without a trailing slash, validated.
    pub fn normalized_base_url(&self) -> ClientResult<String> {
        Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidArgument(format!("invalid base url '{}': {}", self.base_url, e))
        })?;
        Ok(self.base_url.trim_end_matches('/').to_string())
    }
}
