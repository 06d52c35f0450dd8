//! URL query parameters.
//!
//! [`QueryParameters`] is an ordered, case-insensitive view over the query
//! string. Repeated keys collapse into one entry whose value joins every
//! occurrence with a comma, in the order they appeared.

use crate::naming::eq_ignore_case;
use crate::{ExtractionError, ExtractionSource};
use indexmap::IndexMap;

/// Query key that carries a platform authorization token rather than
/// caller-supplied data.
const AUTH_CODE_KEY: &str = "code";

/// Parsed URL query parameters.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::QueryParameters;
///
/// let query = QueryParameters::parse("Name=Ada&tag=a&TAG=b").unwrap();
///
/// assert_eq!(query.len(), 2);
/// assert_eq!(query.get("name"), Some("Ada"));
/// assert_eq!(query.get("tag"), Some("a,b"));
/// assert!(query.is_available());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    // Keyed by the lower-cased name; holds the first spelling seen and the value.
    entries: IndexMap<String, (String, String)>,
}

impl QueryParameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error if the string cannot be decoded.
    pub fn parse(query: &str) -> Result<Self, ExtractionError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).map_err(|e| {
            ExtractionError::invalid_value(ExtractionSource::Query, query, e.to_string())
        })?;

        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        Ok(params)
    }

    /// Adds a value, joining it onto an existing entry with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&key.to_lowercase()) {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => {
                self.entries.insert(key.to_lowercase(), (key, value));
            }
        }
    }

    /// Returns the value for a key, ignoring case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_lowercase())
            .or_else(|| {
                self.entries
                    .values()
                    .find(|(original, _)| eq_ignore_case(original, key))
            })
            .map(|(_, v)| v.as_str())
    }

    /// Whether the query string counts as caller-supplied input.
    ///
    /// True with more than one entry, or with exactly one entry whose key is
    /// not `code` (any case). A lone `code` is an authorization token.
    #[must_use]
    pub fn is_available(&self) -> bool {
        match self.entries.len() {
            0 => false,
            1 => self
                .entries
                .values()
                .all(|(key, _)| !eq_ignore_case(key, AUTH_CODE_KEY)),
            _ => true,
        }
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over (key, value) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
