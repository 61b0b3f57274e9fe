//! REST client for the FaceCloud face analysis service.
//!
//! This crate provides:
//! - Endpoint discovery from the service's API description
//! - Token and credentials login
//! - Face detection and two-image matching with sparse query parameters
//! - Response readers decoding bounding boxes, landmarks, attributes and demographics
//! - Per-call timeouts with request metrics

pub mod auth;
pub mod backend;
pub mod catalog;
pub mod client;
pub mod config;
pub mod content;
pub mod detector;
pub mod error;
pub mod metrics;
pub mod operation;
pub mod params;
pub mod query;
pub mod reader;
pub mod settings;
pub mod transport;

pub use auth::{AuthState, Authenticator, Token};
pub use backend::Backend;
pub use catalog::EndpointCatalog;
pub use client::{Completion, FaceClient};
pub use config::{AuthHeader, FaceClientConfig};
pub use content::ContentType;
pub use detector::FaceDetector;
pub use error::{ClientError, ClientResult};
pub use operation::Operation;
pub use params::FaceParameters;
pub use query::{build_query, QueryTerm, QueryValue};
pub use reader::{FieldMap, ResponseDocument};
pub use settings::{MemorySettings, SettingsStore};
pub use transport::{HttpRequest, HttpResponse, RequestBody, Transport};
