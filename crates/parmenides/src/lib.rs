//! # Parmenides
//!
//! **Typed request parameters and JSON responses for HTTP functions**
//!
//! Parmenides merges the three places a request carries its parameters into
//! one strongly-typed value, runs a business function on it, and turns the
//! result back into an HTTP response:
//!
//! - **Materialization** – JSON body, query string and route values, in a
//!   fixed precedence
//! - **Derived descriptors** – `#[derive(Bindable)]` instead of runtime reflection
//! - **Response envelopes** – 200 with JSON, 404 when absent, 400/500 on failure
//! - **Layered configuration** – defaults, TOML/JSON files, `.env`, environment
//! - **Structured logging** – `tracing` with JSON or pretty output
//!
//! ## Quick Start
//!
//! ```rust
//! use parmenides::prelude::*;
//! use http::Uri;
//!
//! # tokio_test::block_on(async {
//! let handler = RequestHandler::default();
//! let template = RouteTemplate::parse(parmenides::example::EXAMPLE_ROUTE);
//!
//! let ctx = ExtractionContextBuilder::new()
//!     .uri(Uri::from_static("/Example/Ada/Lovelace"))
//!     .route_values(template.match_path("/Example/Ada/Lovelace").unwrap_or_default())
//!     .build();
//!
//! let response = parmenides::example::handle_example(&handler, &ctx).await;
//! assert_eq!(
//!     &response.body()[..],
//!     br#"{"firstName":"Ada","lastName":"Lovelace"}"#
//! );
//! # });
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request → ExtractionContext → materialize → business fn → JsonEnvelope → Response
//!              ▲                    │
//!     body ────┤              route > query > body
//!     query ───┤
//!     route ───┘
//! ```

#![doc(html_root_url = "https://docs.rs/parmenides/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod handler;
mod request_id;
mod route;

pub mod example;

pub use handler::RequestHandler;
pub use request_id::RequestId;
pub use route::RouteTemplate;

// Re-export extraction types
pub use parmenides_extract as extract;

// Re-export configuration types
pub use parmenides_config as config;

// Re-export logging setup
pub use parmenides_telemetry as telemetry;

// Re-export macros - the descriptor derive
pub use parmenides_macros::Bindable;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use parmenides::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{RequestHandler, RequestId, RouteTemplate};

    // Trait and derive share the name
    pub use parmenides_extract::Bindable;
    pub use parmenides_macros::Bindable;

    pub use parmenides_extract::{
        materialize, ExtractionContext, ExtractionContextBuilder, ExtractionError,
        ExtractionErrorKind, FromParam, FromRequest, NamingPolicy, Parameters, QueryParameters,
        RouteValues, SerializationConfig,
    };

    // Re-export common response builders
    pub use parmenides_extract::response::{
        bad_request_response, build_response, error_response, error_response_with, JsonEnvelope,
    };

    pub use parmenides_config::{ConfigLoader, HandlerConfig, ParmenidesConfig};

    pub use parmenides_telemetry::{init_logging, LogConfig, LogFormat};
}
