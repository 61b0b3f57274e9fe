//! High-level service operations.

use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};

/// Remote actions the service describes. Only login, detect and match are
/// supported by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Detect,
    Match,
    Databases,
    Persons,
    Photos,
    Users,
}

impl Operation {
    pub const SUPPORTED: &'static [Operation] =
        &[Operation::Login, Operation::Detect, Operation::Match];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Detect => "detect",
            Operation::Match => "match",
            Operation::Databases => "databases",
            Operation::Persons => "persons",
            Operation::Photos => "photos",
            Operation::Users => "users",
        }
    }

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Catalog key of a supported operation.
    pub fn key(&self) -> ClientResult<&'static str> {
        if self.is_supported() {
            Ok(self.as_str())
        } else {
            Err(ClientError::not_implemented(format!(
                "operation '{}' is not supported",
                self.as_str()
            )))
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "login" => Ok(Operation::Login),
            "detect" => Ok(Operation::Detect),
            "match" => Ok(Operation::Match),
            "databases" => Ok(Operation::Databases),
            "persons" => Ok(Operation::Persons),
            "photos" => Ok(Operation::Photos),
            "users" => Ok(Operation::Users),
            _ => Err(ClientError::InvalidArgument(format!("unknown operation '{}'", s))),
        }
    }
}
