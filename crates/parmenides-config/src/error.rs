//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why a [`ConfigLoader`](crate::ConfigLoader) could not produce a config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `with_file` was given a path that does not exist.
    #[error("config file {} does not exist", .path.display())]
    FileNotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("could not read config file {}", .path.display())]
    ReadError {
        /// Requested path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax error or a key the schema does not know.
    #[error("invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON syntax error or a key the schema does not know.
    #[error("invalid JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Neither `toml` nor `json`.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// A value parsed but failed validation.
    #[error("{field} is invalid: {reason}")]
    InvalidValue {
        /// Dotted key, e.g. `logging.level`.
        field: String,
        /// Validation message.
        reason: String,
    },

    /// An override variable held an unusable value.
    #[error("environment variable {var} is invalid: {reason}")]
    EnvParseError {
        /// Full variable name including the prefix.
        var: String,
        /// Expected shape of the value.
        reason: String,
    },

    /// A `.env` file was found but could not be loaded.
    #[error("could not load .env file: {0}")]
    Dotenv(String),
}

impl ConfigError {
    pub(crate) fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub(crate) fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }
}
