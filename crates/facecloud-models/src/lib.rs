//! Shared data models for the FaceCloud client.
//!
//! This crate provides Serde-serializable types for:
//! - Face rectangles used as request parameters and decoded bounding boxes
//! - Detection and match parameter sets with their mutual-exclusion rules
//! - Decoded face features (landmarks, demographics, attributes)

pub mod error;
pub mod face;
pub mod params;
pub mod rect;

// Re-export common types
pub use error::{ModelError, ModelResult};
pub use face::{Age, Attributes, Demographics, Ethnicity, Gender, Landmark};
pub use params::{ControlData, DetectParams, MatchParams, Mode};
pub use rect::FaceRect;
