//! Response envelopes.
//!
//! | Builder | Status | Body |
//! |---------|--------|------|
//! | [`JsonEnvelope`] / [`build_response`] with a result | success status (200) | JSON |
//! | [`JsonEnvelope`] / [`build_response`] without a result | absent status (404) | empty |
//! | [`error_response`] | 500 | empty |
//! | [`error_response_with`] | 500 | error message |
//! | [`bad_request_response`] | 400 | error message, if given |
//!
//! Only the JSON success case sets a header:
//! `Content-Type: application/json; charset=utf-8`.
//!
//! # Example
//!
//! ```rust
//! use parmenides_extract::response::JsonEnvelope;
//! use http::StatusCode;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let found = JsonEnvelope::new(Some(User { id: 1, name: "Alice".into() }))
//!     .into_response()
//!     .unwrap();
//! assert_eq!(found.status(), StatusCode::OK);
//!
//! let missing = JsonEnvelope::<User>::new(None).into_response().unwrap();
//! assert_eq!(missing.status(), StatusCode::NOT_FOUND);
//! assert!(missing.body().is_empty());
//! ```

use crate::{ResponseError, SerializationConfig};
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};
use serde::Serialize;
use std::error::Error;

/// Content type written with JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// JSON response envelope builder.
///
/// Wraps an optional result. A present result is serialized with the
/// success status; an absent one produces the absent status and no body.
#[derive(Debug)]
pub struct JsonEnvelope<T> {
    result: Option<T>,
    status: StatusCode,
    absent_status: StatusCode,
    config: SerializationConfig,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Creates an envelope with status 200 OK, absent status 404 Not Found
    /// and default serializer options.
    #[must_use]
    pub fn new(result: Option<T>) -> Self {
        Self {
            result,
            status: StatusCode::OK,
            absent_status: StatusCode::NOT_FOUND,
            config: SerializationConfig::default(),
        }
    }

    /// Sets the status used when a result is present.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Sets the status used when the result is absent.
    #[must_use]
    pub fn with_absent_status(mut self, status: StatusCode) -> Self {
        self.absent_status = status;
        self
    }

    /// Sets the serializer options.
    #[must_use]
    pub fn with_config(mut self, config: SerializationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the success status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the absent status.
    #[must_use]
    pub fn absent_status(&self) -> StatusCode {
        self.absent_status
    }

    /// Returns the wrapped result.
    #[must_use]
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Builds the HTTP response.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Serialization`] if the result cannot be
    /// serialized.
    pub fn into_response(self) -> Result<Response<Bytes>, ResponseError> {
        match self.result {
            Some(result) => {
                let body = self.config.to_vec(&result)?;
                let mut response = respond(Bytes::from(body), self.status);
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                Ok(response)
            }
            None => Ok(respond(Bytes::new(), self.absent_status)),
        }
    }
}

/// Builds a JSON response for an optional result.
///
/// `config` of `None` means [`SerializationConfig::default`].
///
/// # Errors
///
/// Returns [`ResponseError::Serialization`] if the result cannot be
/// serialized.
pub fn build_response<T: Serialize>(
    result: Option<T>,
    status: StatusCode,
    absent_status: StatusCode,
    config: Option<&SerializationConfig>,
) -> Result<Response<Bytes>, ResponseError> {
    let envelope = JsonEnvelope::new(result)
        .with_status(status)
        .with_absent_status(absent_status);
    match config {
        Some(config) => envelope.with_config(config.clone()).into_response(),
        None => envelope.into_response(),
    }
}

/// Builds an empty 500 Internal Server Error response.
#[must_use]
pub fn error_response() -> Response<Bytes> {
    respond(Bytes::new(), StatusCode::INTERNAL_SERVER_ERROR)
}

/// Builds a 500 Internal Server Error response whose body is the error's
/// message.
///
/// The message may reveal internal detail; callers decide whether to use
/// this or [`error_response`].
///
/// # Errors
///
/// Returns [`ResponseError::ArgumentMissing`] if `error` is `None`.
pub fn error_response_with(error: Option<&dyn Error>) -> Result<Response<Bytes>, ResponseError> {
    let error = error.ok_or_else(|| ResponseError::argument_missing("error"))?;
    Ok(respond(
        Bytes::from(error.to_string()),
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}

/// Builds a 400 Bad Request response, carrying the error's message when
/// one is given.
#[must_use]
pub fn bad_request_response(error: Option<&dyn Error>) -> Response<Bytes> {
    let body = error.map_or_else(Bytes::new, |e| Bytes::from(e.to_string()));
    respond(body, StatusCode::BAD_REQUEST)
}

fn respond(body: Bytes, status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtractionError, NamingPolicy};
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct TestData {
        id: u64,
        display_name: String,
        note: Option<String>,
    }

    fn data() -> TestData {
        TestData {
            id: 1,
            display_name: "Test".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_present_result() {
        let response = JsonEnvelope::new(Some(data())).into_response().unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
        let body: TestData = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, data());
    }

    #[test]
    fn test_absent_result_defaults_to_not_found() {
        let response = JsonEnvelope::<TestData>::new(None).into_response().unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.body().is_empty());
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_absent_result_custom_status() {
        let response = build_response::<TestData>(
            None,
            StatusCode::OK,
            StatusCode::NO_CONTENT,
            None,
        )
        .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_custom_success_status() {
        let envelope = JsonEnvelope::new(Some(data())).with_status(StatusCode::CREATED);
        assert_eq!(envelope.status(), StatusCode::CREATED);
        assert_eq!(envelope.absent_status(), StatusCode::NOT_FOUND);
        assert!(envelope.result().is_some());

        let response = envelope.into_response().unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_build_response_applies_config() {
        let config = SerializationConfig {
            property_naming: NamingPolicy::CamelCase,
            omit_null_properties: true,
            ..SerializationConfig::default()
        };

        let response =
            build_response(Some(data()), StatusCode::OK, StatusCode::NOT_FOUND, Some(&config))
                .unwrap();
        let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();

        assert_eq!(json["displayName"], "Test");
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_error_response_is_empty() {
        let response = error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_error_response_with_message() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let response = error_response_with(Some(&err)).unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(&response.body()[..], b"disk on fire");
    }

    #[test]
    fn test_error_response_without_error_is_argument_missing() {
        let err = error_response_with(None).unwrap_err();
        assert!(matches!(err, ResponseError::ArgumentMissing { parameter: "error" }));
    }

    #[test]
    fn test_bad_request_response() {
        let err = ExtractionError::missing_input();
        let response = bad_request_response(Some(&err));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(response.body()).contains("no query string values"));

        let empty = bad_request_response(None);
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
        assert!(empty.body().is_empty());
    }
}
