//! Error types for materialization and response building.
//!
//! [`ExtractionError`] classifies why request parameters could not be
//! materialized. [`ResponseError`] covers failures while building an
//! outgoing response.

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Source of the data that was being read when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// JSON request body
    Body,
    /// URL query string parameters
    Query,
    /// Route values extracted from the path template
    Route,
    /// No single source (e.g. nothing was supplied at all)
    Request,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => write!(f, "body"),
            Self::Query => write!(f, "query"),
            Self::Route => write!(f, "route"),
            Self::Request => write!(f, "request"),
        }
    }
}

/// Classification of a materialization failure.
///
/// Both kinds are client-input errors and are never worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    /// No body, no usable query parameters and no usable route values.
    MissingInput,
    /// The body could not be decoded, decoded to nothing, or a query/route
    /// value could not be coerced to its field's type.
    MalformedBody,
}

/// Error that occurs while materializing request parameters.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::{ExtractionError, ExtractionErrorKind, ExtractionSource};
/// use http::StatusCode;
///
/// let err = ExtractionError::invalid_value(ExtractionSource::Query, "age", "expected integer");
/// assert_eq!(err.kind(), ExtractionErrorKind::MalformedBody);
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.field(), Some("age"));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExtractionError {
    extraction_source: ExtractionSource,
    kind: ExtractionErrorKind,
    field: Option<String>,
    message: String,
}

impl ExtractionError {
    /// Creates an error for a request that supplied no usable input at all.
    #[must_use]
    pub fn missing_input() -> Self {
        Self {
            extraction_source: ExtractionSource::Request,
            kind: ExtractionErrorKind::MissingInput,
            field: None,
            message: "there are no query string values, no route values, \
                      and the request body is missing or unreadable"
                .to_string(),
        }
    }

    /// Creates an error for a body that is not correctly formatted.
    #[must_use]
    pub fn malformed_body(details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::MalformedBody,
            field: None,
            message: format!("the request body is not correctly formatted: {details}"),
        }
    }

    /// Creates an error for a query or route value that could not be
    /// assigned to its field.
    #[must_use]
    pub fn invalid_value(
        source: ExtractionSource,
        field: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let details = details.into();
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::MalformedBody,
            message: format!("invalid {source} value for '{field}': {details}"),
            field: Some(field),
        }
    }

    /// Returns the source that was being read.
    #[must_use]
    pub fn extraction_source(&self) -> ExtractionSource {
        self.extraction_source
    }

    /// Returns the failure classification.
    #[must_use]
    pub fn kind(&self) -> ExtractionErrorKind {
        self.kind
    }

    /// Returns `true` if nothing usable was supplied.
    #[must_use]
    pub fn is_missing_input(&self) -> bool {
        self.kind == ExtractionErrorKind::MissingInput
    }

    /// Returns `true` if the supplied input was malformed.
    #[must_use]
    pub fn is_malformed_body(&self) -> bool {
        self.kind == ExtractionErrorKind::MalformedBody
    }

    /// Returns the field name if applicable.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the HTTP status code a handler should answer with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ExtractionErrorKind::MissingInput | ExtractionErrorKind::MalformedBody => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ExtractionErrorKind::MissingInput => "MISSING_INPUT",
            ExtractionErrorKind::MalformedBody => "MALFORMED_BODY",
        }
    }
}

/// Error that occurs while building a response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// A required argument was not supplied. This is a programming error at
    /// the call site, not a request error.
    #[error("required argument '{parameter}' was not supplied")]
    ArgumentMissing {
        /// Name of the missing argument.
        parameter: &'static str,
    },

    /// The result object could not be serialized.
    #[error("failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResponseError {
    /// Creates an argument-missing error.
    #[must_use]
    pub fn argument_missing(parameter: &'static str) -> Self {
        Self::ArgumentMissing { parameter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_error() {
        let err = ExtractionError::missing_input();

        assert!(err.is_missing_input());
        assert!(!err.is_malformed_body());
        assert_eq!(err.extraction_source(), ExtractionSource::Request);
        assert_eq!(err.field(), None);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "MISSING_INPUT");
        assert!(err.to_string().contains("no query string values"));
    }

    #[test]
    fn test_malformed_body_error() {
        let err = ExtractionError::malformed_body("expected value at line 1 column 1");

        assert!(err.is_malformed_body());
        assert_eq!(err.extraction_source(), ExtractionSource::Body);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "MALFORMED_BODY");
        assert!(err.to_string().contains("not correctly formatted"));
        assert!(err.to_string().contains("line 1 column 1"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ExtractionError::invalid_value(ExtractionSource::Route, "age", "expected integer");

        assert_eq!(err.kind(), ExtractionErrorKind::MalformedBody);
        assert_eq!(err.extraction_source(), ExtractionSource::Route);
        assert_eq!(err.field(), Some("age"));
        assert_eq!(err.to_string(), "invalid route value for 'age': expected integer");
    }

    #[test]
    fn test_argument_missing_display() {
        let err = ResponseError::argument_missing("error");
        assert_eq!(err.to_string(), "required argument 'error' was not supplied");
    }

    #[test]
    fn test_extraction_source_display() {
        assert_eq!(ExtractionSource::Body.to_string(), "body");
        assert_eq!(ExtractionSource::Query.to_string(), "query");
        assert_eq!(ExtractionSource::Route.to_string(), "route");
        assert_eq!(ExtractionSource::Request.to_string(), "request");
    }
}
