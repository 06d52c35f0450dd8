//! Main configuration types.
//!
//! This module provides the top-level [`ParmenidesConfig`] struct and its builder.

use parmenides_extract::SerializationConfig;
use parmenides_telemetry::LogFormat;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, HandlerConfig, LoggingSection};

/// Complete service configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// The `serialization` section defaults to [`SerializationConfig::web`].
/// Keys left out of an explicit `[serialization]` table take the library
/// defaults (`preserve`, `false`).
///
/// # Example
///
/// ```
/// use parmenides_config::ParmenidesConfig;
/// use parmenides_extract::NamingPolicy;
///
/// let config = ParmenidesConfig::default();
/// assert_eq!(config.serialization.property_naming, NamingPolicy::CamelCase);
/// assert!(!config.handler.expose_error_details);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParmenidesConfig {
    /// JSON serializer options shared by every handler.
    #[serde(default = "SerializationConfig::web")]
    pub serialization: SerializationConfig,

    /// Handler layer configuration.
    #[serde(default)]
    pub handler: HandlerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for ParmenidesConfig {
    fn default() -> Self {
        Self {
            serialization: SerializationConfig::web(),
            handler: HandlerConfig::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl ParmenidesConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ParmenidesConfigBuilder {
        ParmenidesConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the logging level is not a
    /// valid filter directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.enabled {
            parmenides_telemetry::create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// - Pretty log formatting with ANSI colors
    /// - Debug log level
    /// - Error details in 500 responses
    ///
    /// # Example
    ///
    /// ```
    /// use parmenides_config::ParmenidesConfig;
    ///
    /// let config = ParmenidesConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// assert!(config.handler.expose_error_details);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config.handler.expose_error_details = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// - JSON log formatting
    /// - Info log level
    /// - Error details hidden
    ///
    /// # Example
    ///
    /// ```
    /// use parmenides_config::ParmenidesConfig;
    /// use parmenides_telemetry::LogFormat;
    ///
    /// let config = ParmenidesConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.ansi_enabled = false;

        config.handler.expose_error_details = false;

        config
    }
}

/// Builder for [`ParmenidesConfig`].
#[derive(Debug, Default)]
pub struct ParmenidesConfigBuilder {
    serialization: Option<SerializationConfig>,
    handler: Option<HandlerConfig>,
    logging: Option<LoggingSection>,
}

impl ParmenidesConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the serializer options.
    #[must_use]
    pub fn serialization(mut self, serialization: SerializationConfig) -> Self {
        self.serialization = Some(serialization);
        self
    }

    /// Set the handler configuration.
    #[must_use]
    pub fn handler(mut self, handler: HandlerConfig) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingSection) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> ParmenidesConfig {
        ParmenidesConfig {
            serialization: self.serialization.unwrap_or_else(SerializationConfig::web),
            handler: self.handler.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<ParmenidesConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
