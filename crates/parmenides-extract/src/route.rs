//! Route value storage.
//!
//! Route values are the placeholder values a caller has already extracted
//! from a URL path template such as `/Example/{firstName}/{lastName}`.
//! Storage uses a small-vector optimization so the common case of a few
//! values does not allocate.

use crate::naming::eq_ignore_case;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Maximum number of values stored inline (stack allocated).
const INLINE_VALUES: usize = 4;

/// Route placeholder values supplied alongside a request.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::RouteValues;
///
/// let mut values = RouteValues::new();
/// values.push("firstName", "Ada");
/// values.push("lastName", "Lovelace");
///
/// assert_eq!(values.get("firstName"), Some("Ada"));
/// assert_eq!(values.get_ignore_case("FIRSTNAME"), Some("Ada"));
/// assert!(values.is_available());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteValues {
    inner: SmallVec<[(String, String); INLINE_VALUES]>,
}

impl RouteValues {
    /// Creates an empty set of route values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value for an exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first value whose name matches ignoring case.
    #[must_use]
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| eq_ignore_case(n, name))
            .map(|(_, v)| v.as_str())
    }

    /// Route values count as usable input whenever any were supplied.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.inner.is_empty()
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for RouteValues {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unavailable() {
        let values = RouteValues::new();
        assert!(values.is_empty());
        assert!(!values.is_available());
        assert_eq!(values.len(), 0);
    }

    #[test]
    fn test_push_and_get() {
        let mut values = RouteValues::new();
        values.push("id", "123");
        values.push("name", "alice");

        assert_eq!(values.get("id"), Some("123"));
        assert_eq!(values.get("name"), Some("alice"));
        assert_eq!(values.get("Name"), None);
        assert_eq!(values.get_ignore_case("Name"), Some("alice"));
        assert!(values.is_available());
    }

    #[test]
    fn test_single_code_value_is_available() {
        // The `code` exclusion applies to query strings only.
        let values: RouteValues = [("code", "abc")].into_iter().collect();
        assert!(values.is_available());
    }

    #[test]
    fn test_iter_preserves_order() {
        let values: RouteValues = [("a", "1"), ("b", "2")].into_iter().collect();
        let pairs: Vec<_> = values.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("lastName".to_string(), "Lovelace".to_string());

        let values = RouteValues::from(map);
        assert_eq!(values.get_ignore_case("lastname"), Some("Lovelace"));
    }

    #[test]
    fn test_many_values_spill_to_heap() {
        let mut values = RouteValues::new();
        for i in 0..10 {
            values.push(format!("key{i}"), format!("value{i}"));
        }

        assert_eq!(values.len(), 10);
        assert_eq!(values.get("key7"), Some("value7"));
    }
}
