//! Logging setup for Parmenides services.
//!
//! Wraps `tracing-subscriber` so every service logs the same way:
//!
//! - JSON output in production, pretty output in development
//! - Level filtering through `EnvFilter` directives
//! - Request log macros with shared field names
//!
//! # Example
//!
//! ```rust,ignore
//! use parmenides_telemetry::{init_logging, LogConfig};
//!
//! fn main() {
//!     init_logging(&LogConfig::development()).expect("logging");
//!     tracing::info!("ready");
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;

// Used by the `log_request_*` macros
pub use tracing;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
