//! Query string construction from sparse optional parameters.
//!
//! The service treats an absent parameter differently from an explicit
//! default: leaving out `fd_min_size` lets it apply its own search range,
//! while `fd_min_size=0` would mean "any size". Zero numbers and empty
//! rectangles are therefore never sent. Booleans have no unset state and
//! are always sent.

use facecloud_models::{DetectParams, FaceRect, MatchParams};

pub const MIN_SIZE_KEY: &str = "fd_min_size";
pub const MAX_SIZE_KEY: &str = "fd_max_size";
pub const THRESHOLD_KEY: &str = "fd_threshold";
pub const FACE_KEY: &str = "face";
pub const MATCH_FACE1_KEY: &str = "m_face1";
pub const MATCH_FACE2_KEY: &str = "m_face2";
pub const DEMOGRAPHICS_KEY: &str = "demographics";
pub const ATTRIBUTES_KEY: &str = "attributes";
pub const LANDMARKS_KEY: &str = "landmarks";

/// Value of a query term; the kind decides whether and how it is emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryValue {
    Int(i64),
    Float(f32),
    Bool(bool),
    /// Face rectangle, emitted when non-empty.
    Face(FaceRect),
    /// Face on the second compared image, emitted only after a `Face`
    /// term has been emitted.
    SecondFace(FaceRect),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryTerm {
    pub key: &'static str,
    pub value: QueryValue,
}

impl QueryTerm {
    pub fn new(key: &'static str, value: QueryValue) -> Self {
        Self { key, value }
    }

    pub fn int(key: &'static str, value: i64) -> Self {
        Self::new(key, QueryValue::Int(value))
    }

    pub fn float(key: &'static str, value: f32) -> Self {
        Self::new(key, QueryValue::Float(value))
    }

    pub fn boolean(key: &'static str, value: bool) -> Self {
        Self::new(key, QueryValue::Bool(value))
    }

    pub fn face(key: &'static str, rect: FaceRect) -> Self {
        Self::new(key, QueryValue::Face(rect))
    }

    pub fn second_face(key: &'static str, rect: FaceRect) -> Self {
        Self::new(key, QueryValue::SecondFace(rect))
    }

    /// Render as `key=value` given whether a face term was already emitted.
    fn render(&self, face_emitted: bool) -> Option<String> {
        let value = match self.value {
            QueryValue::Int(v) if v != 0 => v.to_string(),
            QueryValue::Float(v) if v != 0.0 => v.to_string(),
            QueryValue::Bool(v) => v.to_string(),
            QueryValue::Face(rect) if !rect.is_empty() => rect.to_string(),
            QueryValue::SecondFace(rect) if face_emitted && !rect.is_empty() => rect.to_string(),
            _ => return None,
        };
        Some(format!("{}={}", self.key, value))
    }
}

/// Join the emitted terms into `?a=1&b=2`.
///
/// Skipped terms leave no separator behind. Returns an empty string when
/// nothing is emitted.
pub fn build_query(terms: &[QueryTerm]) -> String {
    let mut face_emitted = false;
    let mut parts = Vec::with_capacity(terms.len());

    for term in terms {
        if let Some(part) = term.render(face_emitted) {
            if matches!(term.value, QueryValue::Face(_)) {
                face_emitted = true;
            }
            parts.push(part);
        }
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

/// Terms of a detect request, in request order.
pub fn detect_terms(params: &DetectParams) -> Vec<QueryTerm> {
    vec![
        QueryTerm::int(MIN_SIZE_KEY, params.min_size().into()),
        QueryTerm::int(MAX_SIZE_KEY, params.max_size().into()),
        QueryTerm::float(THRESHOLD_KEY, params.threshold()),
        QueryTerm::face(FACE_KEY, params.face()),
        QueryTerm::boolean(DEMOGRAPHICS_KEY, params.demographics()),
        QueryTerm::boolean(ATTRIBUTES_KEY, params.attributes()),
        QueryTerm::boolean(LANDMARKS_KEY, params.landmarks()),
    ]
}

/// Terms of a match request: first face, then second face, then flags.
pub fn match_terms(params: &MatchParams) -> Vec<QueryTerm> {
    vec![
        QueryTerm::face(MATCH_FACE1_KEY, params.face1()),
        QueryTerm::second_face(MATCH_FACE2_KEY, params.face2()),
        QueryTerm::boolean(DEMOGRAPHICS_KEY, params.demographics()),
        QueryTerm::boolean(ATTRIBUTES_KEY, params.attributes()),
        QueryTerm::boolean(LANDMARKS_KEY, params.landmarks()),
    ]
}
