//! Error types for body conversion and the REST client core.
//!
//! # Design
//! Stream failures keep their `io::Error` untouched so callers can tell a
//! dropped connection from a bad document. Decode failures are split into a
//! small closed set (`Syntax`, `Schema`, `UnexpectedElement`) instead of one
//! opaque "conversion failed" kind. Encode failures are ordinary values; the
//! caller decides whether they are fatal.

use std::io;

use quick_xml::{DeError, SeError};

/// Errors returned by a `Converter` in either direction.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Reading the response body stream failed.
    #[error("failed to read body: {0}")]
    Io(#[from] io::Error),

    /// The body is not well-formed XML or is not valid UTF-8.
    #[error("malformed XML: {0}")]
    Syntax(String),

    /// The document is well-formed but does not fit the target type.
    #[error("XML does not match target type: {0}")]
    Schema(#[source] DeError),

    /// Strict mode found content the target type does not declare.
    #[error("unexpected XML content at `{path}`")]
    UnexpectedElement { path: String },

    /// The value could not be written as XML.
    #[error("failed to serialize body: {0}")]
    Serialize(#[from] SeError),
}

impl From<DeError> for ConversionError {
    fn from(err: DeError) -> Self {
        match err {
            DeError::InvalidXml(e) => ConversionError::Syntax(e.to_string()),
            DeError::UnexpectedEof => ConversionError::Syntax("unexpected end of document".to_string()),
            other => ConversionError::Schema(other),
        }
    }
}

impl From<quick_xml::Error> for ConversionError {
    fn from(err: quick_xml::Error) -> Self {
        ConversionError::Syntax(err.to_string())
    }
}

/// Errors returned by `RestClient` parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404 — the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one and 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The body could not be converted to or from the expected type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
