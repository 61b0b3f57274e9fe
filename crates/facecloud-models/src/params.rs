//! Request parameter sets for detect and match calls.
//!
//! Numeric parameters use zero as the "unset" value and rectangles use the
//! all-zero rectangle; neither is ever sent to the service. A face rectangle
//! replaces the detector search, so on [`DetectParams`] the rectangle and
//! the size bounds exclude each other: whichever is written first wins and
//! later writes to the other category are rejected.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::rect::FaceRect;

/// Which parameter set the facade setters write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Detect,
    Match,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Detect => "detect",
            Mode::Match => "match",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detect" => Ok(Mode::Detect),
            "match" => Ok(Mode::Match),
            _ => Err(ModelError::UnknownMode(s.to_string())),
        }
    }
}

/// Optional tuning values for a single detect call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectParams {
    min_size: i32,
    max_size: i32,
    threshold: f32,
    face: FaceRect,
    demographics: bool,
    attributes: bool,
    landmarks: bool,
}

impl DetectParams {
    /// Minimal face size the detector searches for (0 = server default).
    pub fn min_size(&self) -> i32 {
        self.min_size
    }

    /// Maximal face size the detector searches for (0 = server default).
    pub fn max_size(&self) -> i32 {
        self.max_size
    }

    /// Score threshold applied to found faces (0 = server default).
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn face(&self) -> FaceRect {
        self.face
    }

    pub fn demographics(&self) -> bool {
        self.demographics
    }

    pub fn attributes(&self) -> bool {
        self.attributes
    }

    pub fn landmarks(&self) -> bool {
        self.landmarks
    }

    /// True while at least one size bound is set.
    pub fn has_size_bounds(&self) -> bool {
        self.min_size != 0 || self.max_size != 0
    }

    /// Set the minimal face size. Rejected once a face rectangle is set.
    pub fn set_min_size(&mut self, min: i32) -> bool {
        if !self.face.is_empty() {
            return false;
        }
        self.min_size = min;
        true
    }

    /// Set the maximal face size. Rejected once a face rectangle is set.
    pub fn set_max_size(&mut self, max: i32) -> bool {
        if !self.face.is_empty() {
            return false;
        }
        self.max_size = max;
        true
    }

    /// Set the score threshold. Rejected once a face rectangle is set,
    /// since no detector runs in that case.
    pub fn set_threshold(&mut self, threshold: f32) -> bool {
        if !self.face.is_empty() {
            return false;
        }
        self.threshold = threshold;
        true
    }

    /// Set the face rectangle. Rejected while size bounds are set.
    pub fn set_face(&mut self, face: FaceRect) -> bool {
        if self.has_size_bounds() {
            return false;
        }
        self.face = face;
        true
    }

    pub fn set_demographics(&mut self, enable: bool) {
        self.demographics = enable;
    }

    pub fn set_attributes(&mut self, enable: bool) {
        self.attributes = enable;
    }

    pub fn set_landmarks(&mut self, enable: bool) {
        self.landmarks = enable;
    }
}

/// Optional values for a match call: one rectangle per compared image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchParams {
    face1: FaceRect,
    face2: FaceRect,
    demographics: bool,
    attributes: bool,
    landmarks: bool,
}

impl MatchParams {
    /// Face on the first image.
    pub fn face1(&self) -> FaceRect {
        self.face1
    }

    /// Face on the second image.
    pub fn face2(&self) -> FaceRect {
        self.face2
    }

    pub fn demographics(&self) -> bool {
        self.demographics
    }

    pub fn attributes(&self) -> bool {
        self.attributes
    }

    pub fn landmarks(&self) -> bool {
        self.landmarks
    }

    pub fn set_face1(&mut self, face: FaceRect) {
        self.face1 = face;
    }

    pub fn set_face2(&mut self, face: FaceRect) {
        self.face2 = face;
    }

    pub fn set_demographics(&mut self, enable: bool) {
        self.demographics = enable;
    }

    pub fn set_attributes(&mut self, enable: bool) {
        self.attributes = enable;
    }

    pub fn set_landmarks(&mut self, enable: bool) {
        self.landmarks = enable;
    }
}

/// Full snapshot of user-facing control values, applied in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ControlData {
    pub min_size: i32,
    pub max_size: i32,
    pub threshold: f32,
    pub face: FaceRect,
    pub face2: FaceRect,
    pub demographics: bool,
    pub attributes: bool,
    pub landmarks: bool,
}
