//! Content types used in request headers.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    #[default]
    None,
    Json,
    Jpeg,
    FormData,
    Png,
    Svg,
    Plain,
    Html,
    Csv,
}

impl ContentType {
    /// MIME string for the `Content-Type` header; `None` sets no header.
    pub fn mime(&self) -> Option<&'static str> {
        match self {
            ContentType::None => None,
            ContentType::Json => Some("application/json"),
            ContentType::Jpeg => Some("image/jpeg"),
            ContentType::FormData => Some("multipart/form-data"),
            ContentType::Png => Some("image/png"),
            ContentType::Svg => Some("image/svg+xml"),
            ContentType::Plain => Some("text/plain"),
            ContentType::Html => Some("text/html; charset=utf-8"),
            ContentType::Csv => Some("text/csv"),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime().unwrap_or(""))
    }
}
