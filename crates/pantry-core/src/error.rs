//! Error types for the pantry client library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all pantry operations.
#[derive(Error, Debug)]
pub enum PantryError {
    /// The request never produced a response (connection refused, DNS, reset)
    #[error("Network failure calling {url}: {reason}")]
    Network { url: String, reason: String },
    /// The backend answered with a non-2xx status
    #[error("HTTP {status}{}", body_suffix(.body))]
    Http { status: u16, body: Option<String> },
    /// The backend reported that the addressed resource does not exist
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: String },
    /// Client-side validation rejected the input before any request was sent
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Calendar arithmetic or parsing failed
    #[error("Invalid date: {source}")]
    InvalidDate {
        #[from]
        source: jiff::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) if !text.is_empty() => format!(": {text}"),
        _ => String::new(),
    }
}

/// Builder for creating HTTP failures with an optional response body.
pub struct HttpErrorBuilder {
    status: u16,
}

impl HttpErrorBuilder {
    /// Create a new HTTP error builder for a status code.
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Build the error with the response body text.
    pub fn with_body(self, body: impl Into<String>) -> PantryError {
        PantryError::Http {
            status: self.status,
            body: Some(body.into()),
        }
    }

    /// Build the error without a body.
    pub fn without_body(self) -> PantryError {
        PantryError::Http {
            status: self.status,
            body: None,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PantryError {
        PantryError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PantryError {
    /// Creates a builder for HTTP status failures.
    pub fn http(status: u16) -> HttpErrorBuilder {
        HttpErrorBuilder::new(status)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a not-found error for a resource kind and identifier.
    pub fn not_found(resource: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// True for `NotFound`, and for a raw HTTP 404 that was not yet
    /// translated by a store operation.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Http { status: 404, .. }
        )
    }

    /// True when no response reached the client.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// True when the request was rejected locally before being sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Status code for backend failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Extension trait translating a backend 404 into a semantic `NotFound`.
pub trait NotFoundExt<T> {
    /// Replace an HTTP 404 failure with `PantryError::NotFound`.
    fn or_not_found(self, resource: &'static str, id: impl fmt::Display) -> Result<T>;
}

impl<T> NotFoundExt<T> for Result<T> {
    fn or_not_found(self, resource: &'static str, id: impl fmt::Display) -> Result<T> {
        self.map_err(|e| match e {
            PantryError::Http { status: 404, .. } => PantryError::not_found(resource, id),
            other => other,
        })
    }
}

/// Extension trait mapping configuration-related failures.
pub trait ConfigResultExt<T> {
    /// Map any error into `PantryError::Configuration` with a message.
    fn config_context(self, message: &str) -> Result<T>;
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn config_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PantryError::Configuration {
            message: format!("{message}: {e}"),
        })
    }
}

/// Result type alias for pantry operations
pub type Result<T> = std::result::Result<T, PantryError>;
