//! Model conversion errors.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid face rectangle '{0}': expected x,y,w,h")]
    InvalidRect(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),
}
