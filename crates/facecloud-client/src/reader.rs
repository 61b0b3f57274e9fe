//! Read named sub-objects out of a response document.
//!
//! The service answers with an object whose top-level values are arrays of
//! face objects (`{"data": [{"bbox": ..., "landmarks": ...}, ...]}`). A key
//! is looked up on the root object first and then on the first face object
//! exposing it. A missing key reads as an empty [`FieldMap`], never an
//! error: callers treat "empty" as "feature not present".

use facecloud_models::{Age, Attributes, Demographics, Ethnicity, FaceRect, Gender, Landmark};
use serde_json::Value;
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// Key/value pairs ordered by key; equal keys keep their document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, Value)>,
}

impl FieldMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// All values stored under `key`, in document order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(String, Value)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut entries: Vec<(String, Value)> = iter.into_iter().collect();
        // Stable sort: equal keys stay in insertion order.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }
}

/// Parsed response body. Reading never mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseDocument {
    root: Value,
}

impl ResponseDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn parse(body: &[u8]) -> ClientResult<Self> {
        let root = serde_json::from_slice(body)
            .map_err(|e| ClientError::malformed(format!("response is not JSON: {}", e)))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_inner(self) -> Value {
        self.root
    }

    /// True for null, an empty object or an empty array.
    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Locate the value stored under `key`.
    pub fn find(&self, key: &str) -> Option<&Value> {
        match &self.root {
            Value::Object(map) => map
                .get(key)
                .or_else(|| map.values().find_map(|v| first_in_array(v, key))),
            array @ Value::Array(_) => first_in_array(array, key),
            _ => None,
        }
    }

    /// Fields of the object stored under `key`.
    pub fn read_object(&self, key: &str) -> FieldMap {
        match self.find(key) {
            Some(Value::Object(object)) => object
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            _ => FieldMap::default(),
        }
    }

    /// Fields of every object in the array stored under `key`, merged.
    ///
    /// For `[{"x":1,"y":2},{"x":3,"y":4}]` the result is
    /// `x:1, x:3, y:2, y:4`.
    pub fn read_array(&self, key: &str) -> FieldMap {
        match self.find(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .flat_map(|object| object.iter().map(|(k, v)| (k.clone(), v.clone())))
                .collect(),
            _ => FieldMap::default(),
        }
    }

    /// Decoded bounding box; `None` when the response has none.
    pub fn bounding_box(&self) -> Option<FaceRect> {
        decode_bounding_box(&self.read_object("bbox"))
    }

    /// Decoded landmark points; empty when the response has none.
    pub fn landmarks(&self) -> ClientResult<Vec<Landmark>> {
        decode_landmarks(&self.read_array("landmarks"))
    }

    pub fn attributes(&self) -> Attributes {
        decode_attributes(&self.read_object("attributes"))
    }

    pub fn demographics(&self) -> Option<Demographics> {
        decode_demographics(&self.read_object("demographics"))
    }
}

fn first_in_array<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .find_map(|object| object.get(key))
}

fn as_i32(value: &Value) -> Option<i32> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
        .and_then(|v| i32::try_from(v).ok())
}

/// Bounding box from `x`, `y`, `w`/`width`, `h`/`height`.
pub fn decode_bounding_box(fields: &FieldMap) -> Option<FaceRect> {
    if fields.is_empty() {
        return None;
    }
    let field = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| fields.get(name).and_then(as_i32))
            .unwrap_or(0)
    };
    Some(FaceRect::new(
        field(&["x"]),
        field(&["y"]),
        field(&["w", "width"]),
        field(&["h", "height"]),
    ))
}

/// Pair the first half of the merged landmark fields with the second half.
///
/// Merged fields are ordered by key, so all `x` values precede all `y`
/// values and entry `i` pairs with entry `i + len / 2`. An odd count
/// cannot be paired and is rejected rather than silently truncated.
pub fn decode_landmarks(fields: &FieldMap) -> ClientResult<Vec<Landmark>> {
    if fields.len() % 2 != 0 {
        warn!(count = fields.len(), "Odd number of landmark coordinates");
        return Err(ClientError::malformed(format!(
            "landmark coordinates have odd length {}",
            fields.len()
        )));
    }

    let values: Vec<f64> = fields
        .values()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| ClientError::malformed(format!("landmark coordinate {} is not a number", v)))
        })
        .collect::<ClientResult<_>>()?;

    let (xs, ys) = values.split_at(values.len() / 2);
    Ok(xs
        .iter()
        .zip(ys)
        .map(|(x, y)| Landmark::new(*x, *y))
        .collect())
}

/// Attribute values as strings; non-string values use their JSON text.
pub fn decode_attributes(fields: &FieldMap) -> Attributes {
    fields
        .iter()
        .map(|(k, v)| {
            let value = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.to_string(), value)
        })
        .collect()
}

pub fn decode_demographics(fields: &FieldMap) -> Option<Demographics> {
    if fields.is_empty() {
        return None;
    }

    let mut demographics = Demographics::default();
    if let Some(age) = fields.get("age") {
        demographics.age = Age {
            mean: age.get("mean").and_then(Value::as_f64).unwrap_or_default(),
            variance: age.get("variance").and_then(Value::as_f64).unwrap_or_default(),
        };
    }
    if let Some(gender) = fields.get("gender").and_then(Value::as_str) {
        demographics.gender = Gender::from(gender);
    }
    if let Some(ethnicity) = fields.get("ethnicity").and_then(Value::as_str) {
        demographics.ethnicity = Ethnicity::from(ethnicity);
    }
    Some(demographics)
}
