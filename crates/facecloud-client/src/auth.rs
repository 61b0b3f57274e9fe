//! Session state and login handshake.
//!
//! A session moves `Anonymous -> Authenticating -> Authenticated` once and
//! stays authenticated for the life of the client. The login write lock is
//! held across the handshake, so the "already authenticated" check and the
//! transition are atomic: concurrent logins wait and then see the session.

use std::fmt;

use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::config::AuthHeader;
use crate::content::ContentType;
use crate::error::{ClientError, ClientResult};
use crate::operation::Operation;
use crate::settings::SettingsStore;
use crate::transport::{HttpRequest, RequestBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// A secret token with its auth scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    scheme: String,
    secret: String,
}

impl Token {
    pub fn new(scheme: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            secret: secret.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// `"{scheme} {secret}"`, or the bare secret when no scheme is set.
    pub fn header_value(&self) -> String {
        if self.scheme.is_empty() {
            self.secret.clone()
        } else {
            format!("{} {}", self.scheme, self.secret)
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("scheme", &self.scheme)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Holds the session token and performs the login handshake.
pub struct Authenticator {
    scheme: String,
    header: AuthHeader,
    session: RwLock<Option<Token>>,
}

impl Authenticator {
    pub fn new(scheme: impl Into<String>, header: AuthHeader) -> Self {
        Self {
            scheme: scheme.into(),
            header,
            session: RwLock::new(None),
        }
    }

    pub fn state(&self) -> AuthState {
        match self.session.try_read() {
            Ok(session) if session.is_some() => AuthState::Authenticated,
            Ok(_) => AuthState::Anonymous,
            Err(_) => AuthState::Authenticating,
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// True once a login has succeeded; requests then carry the auth header.
    pub async fn requires_auth(&self) -> bool {
        self.is_authenticated().await
    }

    /// Adopt a ready token without a network call.
    ///
    /// Returns `false` when the session was already authenticated.
    pub async fn login_with_token(&self, token: &str) -> ClientResult<bool> {
        if self.is_authenticated().await {
            debug!("Already authenticated, token login skipped");
            return Ok(false);
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::auth_error("token is empty"));
        }

        let mut session = self.session.write().await;
        if session.is_some() {
            return Ok(false);
        }

        *session = Some(Token::new(&self.scheme, token));
        info!(scheme = %self.scheme, "Authenticated with token");
        Ok(true)
    }

    /// Exchange credentials for a token at the backend's login endpoint.
    ///
    /// On success the token is written to `settings` unless the store
    /// already holds one. Returns `false` when already authenticated.
    pub async fn login_with_credentials(
        &self,
        backend: &Backend,
        email: &str,
        password: &str,
        settings: &dyn SettingsStore,
    ) -> ClientResult<bool> {
        if self.is_authenticated().await {
            debug!("Already authenticated, credentials login skipped");
            return Ok(false);
        }

        if email.is_empty() || password.is_empty() {
            return Err(ClientError::auth_error("email or password is empty"));
        }

        let mut session = self.session.write().await;
        if session.is_some() {
            return Ok(false);
        }

        let url = backend.url_for(Operation::Login)?;
        let request = HttpRequest::post("login", url)
            .content_type(ContentType::Json)
            .body(RequestBody::Json(json!({
                "email": email,
                "password": password,
            })));

        let response = backend.send(request).await?;
        let document = match response.json() {
            Ok(document) => document,
            Err(_) if !response.is_success() => {
                return Err(ClientError::auth_error(format!(
                    "login rejected with status {}: {}",
                    response.status,
                    response.text().trim()
                )));
            }
            Err(e) => return Err(e),
        };

        let secret = extract_access_token(&document).ok_or_else(|| {
            ClientError::auth_error(format!(
                "login response (status {}) has no data.access_token",
                response.status
            ))
        })?;

        *session = Some(Token::new(&self.scheme, secret));
        if settings.token().is_empty() {
            settings.set_token(secret);
        }

        info!(scheme = %self.scheme, "Authenticated with credentials");
        Ok(true)
    }

    /// Scheme-prefixed token, `None` before authentication.
    pub async fn auth_header_value(&self) -> Option<String> {
        self.session.read().await.as_ref().map(Token::header_value)
    }

    /// Header to attach to a request, `None` before authentication.
    pub async fn authorization(&self) -> ClientResult<Option<(HeaderName, HeaderValue)>> {
        let Some(value) = self.auth_header_value().await else {
            return Ok(None);
        };

        let mut value = HeaderValue::from_str(&value)
            .map_err(|_| ClientError::auth_error("token contains characters not allowed in headers"))?;
        value.set_sensitive(true);
        Ok(Some((self.header.header_name(), value)))
    }
}

fn extract_access_token(document: &Value) -> Option<&str> {
    document
        .pointer("/data/access_token")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
