//! Typed configuration for Parmenides services.
//!
//! - TOML and JSON configuration files
//! - `.env` files and prefixed environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`ParmenidesConfig`] has three sections:
//!
//! - `serialization` - [`SerializationConfig`](parmenides_extract::SerializationConfig),
//!   the JSON options shared by request decoding and response encoding
//! - [`HandlerConfig`] - handler layer behavior
//! - [`LoggingSection`] - log level and format
//!
//! # Example
//!
//! ```no_run
//! use parmenides_config::ConfigLoader;
//!
//! # fn main() -> Result<(), parmenides_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("parmenides.toml")?
//!     .with_dotenv()?
//!     .with_env_prefix("PARMENIDES")
//!     .load()?;
//!
//! println!("property naming: {:?}", config.serialization.property_naming);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [serialization]
//! property_naming = "camel_case"
//! dictionary_key_naming = "camel_case"
//! omit_null_properties = true
//! case_insensitive_properties = true
//!
//! [handler]
//! expose_error_details = false
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY` variables:
//!
//! - `PARMENIDES__SERIALIZATION__OMIT_NULL_PROPERTIES=false`
//! - `PARMENIDES__HANDLER__EXPOSE_ERROR_DETAILS=true`
//! - `PARMENIDES__LOGGING__LEVEL=debug`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{ParmenidesConfig, ParmenidesConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{HandlerConfig, LoggingSection};
