//! Structured logging for Parmenides.
//!
//! Builds a `tracing-subscriber` registry with an [`EnvFilter`] and a single
//! fmt layer, JSON or pretty.
//!
//! # Example
//!
//! ```rust,ignore
//! use parmenides_telemetry::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//!
//! tracing::info!(operation_id = "Example", "Processing request");
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line, human-readable output.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Install a subscriber at all.
    pub enabled: bool,
    /// `EnvFilter` directives, e.g. `info` or `parmenides=debug,warn`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Emit span open/close events.
    pub span_events: bool,
    /// Record source file and line.
    pub location: bool,
    /// Colorize pretty output.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::Json,
            span_events: false,
            location: false,
            ansi: false,
        }
    }
}

impl LogConfig {
    /// Pretty, colored, debug-level output with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            span_events: true,
            location: true,
            ansi: true,
            ..Self::default()
        }
    }

    /// JSON output at `info`.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Returns true if the output is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == LogFormat::Json
    }
}

/// Installs the global subscriber described by `config`.
///
/// A disabled config installs nothing and succeeds.
///
/// # Errors
///
/// [`TelemetryError::InvalidFilter`] for a bad `level`, checked before
/// anything is installed; [`TelemetryError::LoggingInit`] if a global
/// subscriber already exists.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;
    let spans = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_span_events(spans)
            .with_file(config.location)
            .with_line_number(config.location)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_ansi(config.ansi)
            .with_span_events(spans)
            .with_file(config.location)
            .with_line_number(config.location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Parses `EnvFilter` directives.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] if the string does not parse.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| TelemetryError::InvalidFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}

/// `debug` event when a request enters a handler.
///
/// Fields: `request_id`, `http.method`, `http.path`, `operation_id`.
#[macro_export]
macro_rules! log_request_start {
    ($request_id:expr, $method:expr, $path:expr, $operation:expr) => {
        $crate::tracing::debug!(
            request_id = %$request_id,
            http.method = %$method,
            http.path = %$path,
            operation_id = %$operation,
            "Request started"
        );
    };
}

/// `info` event with the final status and elapsed milliseconds.
#[macro_export]
macro_rules! log_request_complete {
    ($request_id:expr, $operation:expr, $status:expr, $duration_ms:expr) => {
        $crate::tracing::info!(
            request_id = %$request_id,
            operation_id = %$operation,
            http.status_code = $status,
            duration_ms = $duration_ms,
            "Request completed"
        );
    };
}

/// `warn` event for a request refused with a client error.
#[macro_export]
macro_rules! log_request_rejected {
    ($request_id:expr, $operation:expr, $code:expr, $error:expr) => {
        $crate::tracing::warn!(
            request_id = %$request_id,
            operation_id = %$operation,
            error.code = %$code,
            error = %$error,
            "Request rejected"
        );
    };
}

/// `error` event for a request that failed inside the handler.
#[macro_export]
macro_rules! log_request_error {
    ($request_id:expr, $operation:expr, $error:expr) => {
        $crate::tracing::error!(
            request_id = %$request_id,
            operation_id = %$operation,
            error = %$error,
            "Request failed"
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert!(config.is_json());
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.span_events);
        assert!(config.location);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_production_config() {
        let config = LogConfig::production();
        assert!(config.is_json());
        assert!(!config.span_events);
        assert!(!config.ansi);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), r#""json""#);
    }

    #[test]
    fn test_create_env_filter_valid() {
        assert!(create_env_filter("info").is_ok());
        assert!(create_env_filter("parmenides=debug,warn").is_ok());
    }

    #[test]
    fn test_create_env_filter_invalid() {
        let err = create_env_filter("parmenides=loud").unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }

    #[test]
    fn test_request_macros_expand_through_reexport() {
        let id = "0190b3c4-5d6e-7f80-9a1b-2c3d4e5f6a7b";

        crate::log_request_start!(id, "GET", "/Example", "Example");
        crate::log_request_rejected!(id, "Example", "MISSING_INPUT", "no input");
        crate::log_request_error!(id, "Example", "upstream timed out");
        crate::log_request_complete!(id, "Example", 200_u16, 3_u64);
    }

    #[test]
    fn test_disabled_logging() {
        let config = LogConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn test_invalid_level_rejected_before_install() {
        let config = LogConfig {
            level: "parmenides=loud".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::InvalidFilter { .. })
        ));
    }
}
