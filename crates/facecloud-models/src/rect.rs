use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Pixel rectangle of a face on an image.
///
/// The all-zero rectangle is the "unset" value: a request never carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FaceRect {
    /// X coordinate of the top-left corner
    pub x: i32,
    /// Y coordinate of the top-left corner
    pub y: i32,
    /// Width of the rectangle
    pub w: i32,
    /// Height of the rectangle
    pub h: i32,
}

impl FaceRect {
    /// Create a new rectangle.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle is empty when its components sum to zero.
    /// Summed in `i64` so extreme components cannot wrap to zero.
    pub fn is_empty(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .map(|&v| i64::from(v))
            .sum::<i64>()
            == 0
    }
}

/// Formats as `x,y,w,h`, the shape the service expects in query strings.
impl fmt::Display for FaceRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.w, self.h)
    }
}

impl FromStr for FaceRect {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<i32> = s
            .split(',')
            .map(|p| p.trim().parse::<i32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ModelError::InvalidRect(s.to_string()))?;

        match parts.as_slice() {
            [x, y, w, h] => Ok(Self::new(*x, *y, *w, *h)),
            _ => Err(ModelError::InvalidRect(s.to_string())),
        }
    }
}
