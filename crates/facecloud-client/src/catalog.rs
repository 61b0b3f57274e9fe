//! Endpoint discovery from the service's API description document.
//!
//! The description is an OpenAPI-style JSON document whose `paths` object
//! is keyed by route template. Each route contributes its last path segment
//! as the operation key. Routes ending in a path variable (`{p_id}`,
//! `{d_id}`, ...) address single resources and are left out.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::content::ContentType;
use crate::error::{ClientError, ClientResult};
use crate::operation::Operation;
use crate::transport::{HttpRequest, Transport};

/// Operation key to relative request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointCatalog {
    paths: HashMap<String, String>,
}

impl EndpointCatalog {
    /// Fetch and parse the description at `url`.
    ///
    /// Never fails: an unreachable or malformed document yields an empty
    /// catalog, and lookups on it fail per call.
    pub async fn fetch(transport: &Transport, url: &str) -> Self {
        let request = HttpRequest::get("describe", url).content_type(ContentType::Json);

        let response = match transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "Failed to fetch API description");
                return Self::default();
            }
        };

        let catalog = match response.json() {
            Ok(document) => Self::from_description(&document),
            Err(e) => {
                warn!(%url, error = %e, "API description is not valid JSON");
                Self::default()
            }
        };

        if catalog.is_empty() {
            warn!(%url, "API description lists no usable paths");
        } else {
            debug!(%url, endpoints = catalog.len(), "Loaded endpoint catalog");
        }
        catalog
    }

    /// Build a catalog from a parsed description document.
    pub fn from_description(document: &Value) -> Self {
        let Some(routes) = document.get("paths").and_then(Value::as_object) else {
            return Self::default();
        };

        Self::from_routes(routes.keys().map(String::as_str))
    }

    /// Build a catalog from route templates.
    pub fn from_routes<'a>(routes: impl IntoIterator<Item = &'a str>) -> Self {
        let paths = routes
            .into_iter()
            .filter_map(|route| {
                let key = route_key(route)?;
                Some((key.to_string(), route.to_string()))
            })
            .collect();

        Self { paths }
    }

    /// Path of a supported operation.
    pub fn resolve(&self, operation: Operation) -> ClientResult<&str> {
        let key = operation.key()?;
        self.get(key)
            .ok_or_else(|| ClientError::not_found(format!("no path published for '{}'", key)))
    }

    /// Path for a raw operation key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.paths.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Last path segment of a route, unless it is empty or a path variable.
fn route_key(route: &str) -> Option<&str> {
    let key = route.rsplit('/').next().unwrap_or(route);
    if key.is_empty() || key.contains('{') {
        return None;
    }
    Some(key)
}
