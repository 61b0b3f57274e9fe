//! Face operations facade.
//!
//! [`FaceClient`] composes the backend (transport and endpoint catalog),
//! the authenticator and the parameter state into the two supported calls,
//! `detect` and `match_faces`. Every call both returns its result and
//! publishes a [`Completion`] to subscribers, so failures are reported
//! through the same channel as successes.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use facecloud_models::{ControlData, FaceRect, Mode};
use reqwest::multipart::{Form, Part};
use tokio::sync::broadcast;
use tracing::{debug, info_span, warn, Instrument};

use crate::auth::{AuthState, Authenticator};
use crate::backend::Backend;
use crate::catalog::EndpointCatalog;
use crate::config::FaceClientConfig;
use crate::content::ContentType;
use crate::error::{ClientError, ClientResult};
use crate::operation::Operation;
use crate::params::FaceParameters;
use crate::query::{build_query, detect_terms, match_terms};
use crate::reader::ResponseDocument;
use crate::settings::SettingsStore;
use crate::transport::{HttpRequest, RequestBody};

const COMPLETION_CAPACITY: usize = 16;

/// Outcome notification of a detect or match call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub operation: Operation,
    /// True when the call produced a non-empty parsed document.
    pub updated: bool,
}

/// Client for the face analysis service.
pub struct FaceClient {
    backend: Backend,
    auth: Authenticator,
    settings: Arc<dyn SettingsStore>,
    params: FaceParameters,
    completions: broadcast::Sender<Completion>,
}

impl FaceClient {
    /// Create a client and fetch the endpoint catalog.
    ///
    /// An unreachable or malformed description leaves the catalog empty;
    /// only an invalid base URL fails construction.
    pub async fn new(config: FaceClientConfig, settings: Arc<dyn SettingsStore>) -> ClientResult<Self> {
        let backend = Backend::connect(&config).await?;
        let auth = Authenticator::new(config.auth_scheme.clone(), config.auth_header);
        let (completions, _) = broadcast::channel(COMPLETION_CAPACITY);

        Ok(Self {
            backend,
            auth,
            settings,
            params: FaceParameters::default(),
            completions,
        })
    }

    /// Create a client addressed by the store's url and path.
    pub async fn from_settings(settings: Arc<dyn SettingsStore>) -> ClientResult<Self> {
        let config = FaceClientConfig::from_settings(settings.as_ref());
        Self::new(config, settings).await
    }

    /// Receive a [`Completion`] for every subsequent call.
    pub fn subscribe(&self) -> broadcast::Receiver<Completion> {
        self.completions.subscribe()
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    pub fn base_url(&self) -> &str {
        self.backend.base_url()
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        self.backend.catalog()
    }

    pub async fn refresh_catalog(&mut self) {
        self.backend.refresh_catalog().await;
    }

    /// Published path of an operation.
    pub fn path(&self, operation: Operation) -> ClientResult<&str> {
        self.backend.catalog().resolve(operation)
    }

    pub fn timeout(&self) -> Duration {
        self.backend.timeout()
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.backend.set_timeout(timeout);
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    pub async fn requires_auth(&self) -> bool {
        self.auth.requires_auth().await
    }

    pub async fn auth_header_value(&self) -> Option<String> {
        self.auth.auth_header_value().await
    }

    /// Adopt a ready token. No-op once authenticated.
    pub async fn login_with_token(&self, token: &str) -> ClientResult<bool> {
        self.auth.login_with_token(token).await
    }

    /// Log in with email and password. No-op once authenticated.
    pub async fn login_with_credentials(&self, email: &str, password: &str) -> ClientResult<bool> {
        self.auth
            .login_with_credentials(&self.backend, email, password, self.settings.as_ref())
            .instrument(info_span!("login"))
            .await
    }

    /// Log in with whatever the settings store holds: a stored token wins,
    /// then stored credentials. With neither the session stays anonymous.
    pub async fn login_from_settings(&self) -> ClientResult<bool> {
        let token = self.settings.token();
        if !token.is_empty() {
            return self.login_with_token(&token).await;
        }

        let email = self.settings.email();
        let password = self.settings.password();
        if !email.is_empty() && !password.is_empty() {
            return self.login_with_credentials(&email, &password).await;
        }

        warn!("Email and/or password are empty, continuing without login");
        Ok(false)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Detect faces on an image.
    pub async fn detect(&self, image: impl AsRef<Path>) -> ClientResult<ResponseDocument> {
        let image = image.as_ref();
        let result = self
            .send_detect(image)
            .instrument(info_span!("detect", image = %image.display()))
            .await;
        self.complete(Operation::Detect, &result);
        result
    }

    /// Check whether the same person appears on both images.
    pub async fn match_faces(
        &self,
        image1: impl AsRef<Path>,
        image2: impl AsRef<Path>,
    ) -> ClientResult<ResponseDocument> {
        let (image1, image2) = (image1.as_ref(), image2.as_ref());
        let result = self
            .send_match(image1, image2)
            .instrument(info_span!(
                "match",
                image1 = %image1.display(),
                image2 = %image2.display()
            ))
            .await;
        self.complete(Operation::Match, &result);
        result
    }

    async fn send_detect(&self, image: &Path) -> ClientResult<ResponseDocument> {
        let url = self.backend.url_for(Operation::Detect)?;
        let body = read_image(image).await?;
        let query = build_query(&detect_terms(self.params.detect()));

        let request = HttpRequest::post("detect", format!("{}{}", url, query))
            .content_type(ContentType::Jpeg)
            .body(RequestBody::Bytes(body));
        let request = self.authorize(request).await?;

        debug!(query = %query, "Detect request composed");
        let response = self.backend.send(request).await?;
        ResponseDocument::parse(&response.body)
    }

    async fn send_match(&self, image1: &Path, image2: &Path) -> ClientResult<ResponseDocument> {
        let url = self.backend.url_for(Operation::Match)?;
        let form = Form::new()
            .part("image1", image_part(image1).await?)
            .part("image2", image_part(image2).await?);
        let query = build_query(&match_terms(self.params.matching()));

        let request = HttpRequest::post("match", format!("{}{}", url, query))
            .body(RequestBody::Multipart(form));
        let request = self.authorize(request).await?;

        debug!(query = %query, "Match request composed");
        let response = self.backend.send(request).await?;
        ResponseDocument::parse(&response.body)
    }

    /// Attach the session header once a login has succeeded.
    async fn authorize(&self, request: HttpRequest) -> ClientResult<HttpRequest> {
        match self.auth.authorization().await? {
            Some((name, value)) => Ok(request.header(name, value)),
            None => Ok(request),
        }
    }

    fn complete(&self, operation: Operation, result: &ClientResult<ResponseDocument>) {
        let updated = match result {
            Ok(document) => !document.is_empty(),
            Err(e) => {
                warn!(%operation, error = %e, "Request failed");
                false
            }
        };
        // No subscribers is fine.
        let _ = self.completions.send(Completion { operation, updated });
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    pub fn params(&self) -> &FaceParameters {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.params.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.params.set_mode(mode);
    }

    pub fn set_min_size(&mut self, min: i32) -> bool {
        self.params.set_min_size(min)
    }

    pub fn set_max_size(&mut self, max: i32) -> bool {
        self.params.set_max_size(max)
    }

    pub fn set_threshold(&mut self, threshold: f32) -> bool {
        self.params.set_threshold(threshold)
    }

    pub fn set_face1(&mut self, face: FaceRect) -> bool {
        self.params.set_face1(face)
    }

    pub fn set_face2(&mut self, face: FaceRect) -> bool {
        self.params.set_face2(face)
    }

    pub fn set_demographics(&mut self, enable: bool) {
        self.params.set_demographics(enable);
    }

    pub fn set_attributes(&mut self, enable: bool) {
        self.params.set_attributes(enable);
    }

    pub fn set_landmarks(&mut self, enable: bool) {
        self.params.set_landmarks(enable);
    }

    pub fn apply_controls(&mut self, controls: &ControlData) {
        self.params.apply(controls);
    }

    pub fn min_size(&self) -> i32 {
        self.params.min_size()
    }

    pub fn max_size(&self) -> i32 {
        self.params.max_size()
    }

    pub fn threshold(&self) -> f32 {
        self.params.threshold()
    }

    pub fn face(&self) -> FaceRect {
        self.params.face()
    }

    pub fn face2(&self) -> FaceRect {
        self.params.face2()
    }

    pub fn demographics(&self) -> bool {
        self.params.demographics()
    }

    pub fn attributes(&self) -> bool {
        self.params.attributes()
    }

    pub fn landmarks(&self) -> bool {
        self.params.landmarks()
    }
}

async fn read_image(path: &Path) -> ClientResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::io(path, e))
}

async fn image_part(path: &Path) -> ClientResult<Part> {
    let bytes = read_image(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.jpg".to_string());

    let mime = ContentType::Jpeg.mime().unwrap_or("image/jpeg");
    Ok(Part::bytes(bytes).file_name(file_name).mime_str(mime)?)
}
