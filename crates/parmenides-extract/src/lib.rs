//! # Parmenides Extract
//!
//! Request parameter materialization and JSON response envelopes.
//!
//! A request can carry its parameters in three places: a JSON body, the URL
//! query string, and route values pulled from the path template. This crate
//! merges them into one strongly-typed value and turns handler results back
//! into HTTP responses.
//!
//! ## Precedence
//!
//! | Source | Type | Precedence |
//! |--------|------|------------|
//! | JSON body | [`SerializationConfig::from_slice`] | lowest |
//! | Query string | [`QueryParameters`] | overrides body |
//! | Route values | [`RouteValues`] | highest |
//!
//! Query and route keys match field names ignoring case. A query string whose
//! only key is `code` is an authorization token and does not count as input.
//!
//! ## Example
//!
//! ```rust
//! use parmenides_extract::{
//!     Bindable, ExtractionContextBuilder, FieldDescriptor, FromParam, FromRequest, Parameters,
//! };
//! use http::Uri;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Lookup {
//!     #[serde(default)]
//!     id: u64,
//! }
//!
//! impl Bindable for Lookup {
//!     const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor::new(
//!         "id",
//!         <u64 as FromParam>::KIND,
//!         |target: &mut Self, value: &str| {
//!             target.id = u64::from_param(value)?;
//!             Ok(())
//!         },
//!     )];
//! }
//!
//! let ctx = ExtractionContextBuilder::new()
//!     .uri(Uri::from_static("/lookup?ID=7"))
//!     .build();
//!
//! let Parameters(lookup) = Parameters::<Lookup>::from_request(&ctx).unwrap();
//! assert_eq!(lookup.id, 7);
//! ```
//!
//! ## Error Handling
//!
//! Materialization fails with an [`ExtractionError`] classified as
//! `MissingInput` or `MalformedBody`; both map to 400 Bad Request.
//! Response building fails with a [`ResponseError`].

#![doc(html_root_url = "https://docs.rs/parmenides-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod descriptor;
mod error;
mod extractor;
mod materialize;
mod naming;
mod query;
mod route;
mod serialization;
pub mod response;

pub use context::{ExtractionContext, ExtractionContextBuilder};
pub use descriptor::{Bindable, CoercionError, FieldDescriptor, FieldKind, FieldSetter, FromParam};
pub use error::{ExtractionError, ExtractionErrorKind, ExtractionSource, ResponseError};
pub use extractor::FromRequest;
pub use materialize::{materialize, Parameters};
pub use naming::{eq_ignore_case, NamingPolicy};
pub use query::QueryParameters;
pub use response::{
    bad_request_response, build_response, error_response, error_response_with, JsonEnvelope,
};
pub use route::RouteValues;
pub use serialization::SerializationConfig;
