//! Backend location, transport and discovered endpoints.

use std::time::Duration;

use tracing::info;

use crate::catalog::EndpointCatalog;
use crate::config::FaceClientConfig;
use crate::error::ClientResult;
use crate::operation::Operation;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Everything needed to address one service backend.
#[derive(Debug, Clone)]
pub struct Backend {
    base_url: String,
    description_path: String,
    transport: Transport,
    catalog: EndpointCatalog,
}

impl Backend {
    /// Validate the config, build the transport and fetch the catalog once.
    pub async fn connect(config: &FaceClientConfig) -> ClientResult<Self> {
        let base_url = config.normalized_base_url()?;
        let transport = Transport::new(config.timeout)?;

        let mut backend = Self {
            base_url,
            description_path: config.description_path.clone(),
            transport,
            catalog: EndpointCatalog::default(),
        };
        backend.refresh_catalog().await;
        Ok(backend)
    }

    /// Re-fetch the description document, replacing the current catalog.
    pub async fn refresh_catalog(&mut self) {
        let url = self.url(&self.description_path);
        self.catalog = EndpointCatalog::fetch(&self.transport, &url).await;
        info!(
            base_url = %self.base_url,
            endpoints = self.catalog.len(),
            "Endpoint catalog ready"
        );
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.transport.set_timeout(timeout);
    }

    /// Absolute URL of a relative path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL of an operation's published path.
    pub fn url_for(&self, operation: Operation) -> ClientResult<String> {
        let path = self.catalog.resolve(operation)?;
        Ok(self.url(path))
    }

    pub async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        self.transport.send(request).await
    }
}
