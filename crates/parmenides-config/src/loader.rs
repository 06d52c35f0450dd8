//! Layered configuration loading.
//!
//! [`ConfigLoader`] starts from a preset, may replace it with a file or
//! string, and finally applies `PREFIX__SECTION__KEY` environment overrides.

use std::env;
use std::fs;
use std::path::Path;

use parmenides_extract::NamingPolicy;
use parmenides_telemetry::LogFormat;

use crate::{ConfigError, ParmenidesConfig};

/// Builds a [`ParmenidesConfig`] from layers, later ones winning:
///
/// 1. Defaults or a preset
/// 2. A TOML or JSON file (or string)
/// 3. Prefixed environment variables, optionally seeded from `.env`
///
/// A file replaces the whole configuration; sections it leaves out take their
/// defaults, not the values of an earlier preset.
///
/// # Example
///
/// ```no_run
/// use parmenides_config::ConfigLoader;
///
/// # fn main() -> Result<(), parmenides_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("parmenides.toml")?
///     .with_env_prefix("PARMENIDES")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: ParmenidesConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Starts from [`ParmenidesConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ParmenidesConfig::default(),
            env_prefix: None,
        }
    }

    /// Resets to the defaults.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = ParmenidesConfig::default();
        self
    }

    /// Resets to [`ParmenidesConfig::development`].
    ///
    /// # Example
    ///
    /// ```
    /// use parmenides_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_development()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = ParmenidesConfig::development();
        self
    }

    /// Resets to [`ParmenidesConfig::production`].
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = ParmenidesConfig::production();
        self
    }

    /// Replaces the configuration with the contents of `path`, parsed as
    /// TOML or JSON by extension.
    ///
    /// # Errors
    ///
    /// `FileNotFound`, `ReadError`, `UnsupportedFormat`, or a parse error
    /// (including unknown keys).
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file leaves the
    /// configuration unchanged.
    ///
    /// # Errors
    ///
    /// As `with_file`, except `FileNotFound`.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Replaces the configuration with `content` in the named `format`
    /// (`"toml"` or `"json"`, any case).
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` or a parse error.
    ///
    /// # Example
    ///
    /// ```
    /// use parmenides_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [handler]
    ///     expose_error_details = true
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(config.handler.expose_error_details);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => return Err(ConfigError::UnsupportedFormat(format.to_string())),
        };
        Ok(self)
    }

    /// Enables environment overrides named `PREFIX__SECTION__KEY`, e.g.
    /// `PARMENIDES__SERIALIZATION__PROPERTY_NAMING=camel_case` or
    /// `PARMENIDES__LOGGING__LEVEL=debug`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads `.env` into the process environment so prefixed variables in it
    /// take part in the overrides. A missing file is ignored.
    ///
    /// # Errors
    ///
    /// `Dotenv` if the file exists but cannot be parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::Dotenv(e.to_string())),
        }
    }

    /// Applies environment overrides, validates, and returns the result.
    ///
    /// # Errors
    ///
    /// `EnvParseError` for a bad override, `InvalidValue` from validation.
    pub fn load(mut self) -> Result<ParmenidesConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Returns the configuration as layered so far, with no overrides or
    /// validation.
    #[must_use]
    pub fn load_unvalidated(self) -> ParmenidesConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<ParmenidesConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let mut overrides: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();
        overrides.sort();

        overrides
            .iter()
            .try_for_each(|(key, value)| self.apply_env_var(key, value, prefix))
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
        else {
            // Same leading text, different variable (PARMENIDES_HOME).
            return Ok(());
        };

        let parts: Vec<&str> = rest.split("__").collect();
        let serialization = &mut self.config.serialization;

        match parts.as_slice() {
            ["SERIALIZATION", "PROPERTY_NAMING"] => {
                serialization.property_naming = parse_naming(key, value)?;
            }
            ["SERIALIZATION", "DICTIONARY_KEY_NAMING"] => {
                serialization.dictionary_key_naming = parse_naming(key, value)?;
            }
            ["SERIALIZATION", "OMIT_NULL_PROPERTIES"] => {
                serialization.omit_null_properties = parse_flag(key, value)?;
            }
            ["SERIALIZATION", "CASE_INSENSITIVE_PROPERTIES"] => {
                serialization.case_insensitive_properties = parse_flag(key, value)?;
            }

            ["HANDLER", "EXPOSE_ERROR_DETAILS"] => {
                self.config.handler.expose_error_details = parse_flag(key, value)?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_flag(key, value)?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "ANSI_ENABLED"] => {
                self.config.logging.ansi_enabled = parse_flag(key, value)?;
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_flag(key, value)?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))
}

fn parse_naming(key: &str, value: &str) -> Result<NamingPolicy, ConfigError> {
    match value.to_lowercase().replace('-', "_").as_str() {
        "preserve" | "none" => Ok(NamingPolicy::Preserve),
        "camel_case" | "camelcase" => Ok(NamingPolicy::CamelCase),
        "snake_case" | "snakecase" => Ok(NamingPolicy::SnakeCase),
        _ => Err(ConfigError::env_parse_error(
            key,
            "expected 'preserve', 'camel_case' or 'snake_case'",
        )),
    }
}
