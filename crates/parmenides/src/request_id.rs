//! Request identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one handled request.
///
/// UUID v7 embeds a Unix timestamp, so IDs sort by creation time.
///
/// # Example
///
/// ```
/// use parmenides::RequestId;
///
/// let id = RequestId::new();
/// assert_eq!(id.as_uuid().get_version_num(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new time-ordered request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps an existing UUID, e.g. one taken from an inbound header.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_ids_are_v7() {
        assert_eq!(RequestId::default().as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_display_matches_uuid() {
        let uuid = Uuid::now_v7();
        assert_eq!(RequestId::from(uuid).to_string(), uuid.to_string());
    }
}
