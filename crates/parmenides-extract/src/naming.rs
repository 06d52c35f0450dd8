//! Property naming policies and case-insensitive name comparison.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How property or dictionary-key names are spelled in JSON.
///
/// Field names are taken as written in the Rust type (normally
/// `snake_case`) and converted on the way out. On the way in, JSON keys are
/// compared against the converted names.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::NamingPolicy;
///
/// assert_eq!(NamingPolicy::CamelCase.apply("first_name"), "firstName");
/// assert_eq!(NamingPolicy::SnakeCase.apply("firstName"), "first_name");
/// assert_eq!(NamingPolicy::Preserve.apply("first_name"), "first_name");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Names are written exactly as declared.
    #[default]
    Preserve,
    /// `first_name` and `FirstName` become `firstName`.
    CamelCase,
    /// `firstName` and `FirstName` become `first_name`.
    SnakeCase,
}

impl NamingPolicy {
    /// Converts a declared name according to this policy.
    #[must_use]
    pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Preserve => Cow::Borrowed(name),
            Self::CamelCase => Cow::Owned(to_camel_case(name)),
            Self::SnakeCase => Cow::Owned(to_snake_case(name)),
        }
    }
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split('_').filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            if out.is_empty() {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Compares two names ignoring case (Unicode lower-case folding).
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(NamingPolicy::CamelCase.apply("first_name"), "firstName");
        assert_eq!(NamingPolicy::CamelCase.apply("FirstName"), "firstName");
        assert_eq!(NamingPolicy::CamelCase.apply("name"), "name");
        assert_eq!(NamingPolicy::CamelCase.apply("_private_id"), "privateId");
        assert_eq!(NamingPolicy::CamelCase.apply("a__b"), "aB");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(NamingPolicy::SnakeCase.apply("firstName"), "first_name");
        assert_eq!(NamingPolicy::SnakeCase.apply("FirstName"), "first_name");
        assert_eq!(NamingPolicy::SnakeCase.apply("already_snake"), "already_snake");
    }

    #[test]
    fn test_preserve_borrows() {
        assert!(matches!(
            NamingPolicy::Preserve.apply("LastName"),
            Cow::Borrowed("LastName")
        ));
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("Code", "code"));
        assert!(eq_ignore_case("NAME", "name"));
        assert!(eq_ignore_case("Ünïcode", "üNÏCODE"));
        assert!(!eq_ignore_case("name", "names"));
        assert!(!eq_ignore_case("age", "page"));
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: NamingPolicy = serde_json::from_str("\"camel_case\"").unwrap();
        assert_eq!(policy, NamingPolicy::CamelCase);
        assert_eq!(serde_json::to_string(&NamingPolicy::Preserve).unwrap(), "\"preserve\"");
    }
}
