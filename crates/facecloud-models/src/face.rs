//! Decoded face features returned by a detect call.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Free-form attribute name to value (glasses, hair colour, ...).
pub type Attributes = BTreeMap<String, String>;

/// A single landmark point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

/// Unrecognised names map to [`Gender::Unknown`].
impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ethnicity classes reported by the demographics model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Ethnicity {
    #[default]
    Unknown,
    Caucasian,
    Mongoloid,
    Negroid,
    EastAsian,
}

impl Ethnicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ethnicity::Unknown => "unknown",
            Ethnicity::Caucasian => "caucasian",
            Ethnicity::Mongoloid => "mongoloid",
            Ethnicity::Negroid => "negroid",
            Ethnicity::EastAsian => "east_asian",
        }
    }
}

/// Unrecognised names map to [`Ethnicity::Unknown`].
impl From<&str> for Ethnicity {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "caucasian" => Ethnicity::Caucasian,
            "mongoloid" => Ethnicity::Mongoloid,
            "negroid" => Ethnicity::Negroid,
            "east_asian" | "eastasian" => Ethnicity::EastAsian,
            _ => Ethnicity::Unknown,
        }
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimated age distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Age {
    pub mean: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Demographics {
    pub age: Age,
    pub gender: Gender,
    pub ethnicity: Ethnicity,
}
