//! Opaque ID Types
//!
//! Type-safe, string-backed ID wrappers for domain entities.
//!
//! Freshly minted IDs are UUID v4 strings, but any non-empty string read back
//! from storage is accepted so records written by older tooling stay
//! addressable.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type SubmissionId = Id<markers::Submission>;
/// let id = SubmissionId::new();
/// assert_eq!(id.as_str().len(), 36);
/// ```
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Mint a new random ID (UUID v4, hyphenated)
    pub fn new() -> Self {
        Self::from_raw(Uuid::new_v4().to_string())
    }

    /// Name-based ID (UUID v5): the same `seed` always gives the same ID.
    /// Used for stored records that were written without one.
    pub fn derived(seed: &str) -> Self {
        Self::from_raw(Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string())
    }

    /// Wrap an existing identifier as read from storage or a request path
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_raw(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::from_raw(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_raw)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for registration submission IDs
    pub struct Submission;
}

/// Type aliases for common IDs
pub type SubmissionId = Id<markers::Submission>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique_uuids() {
        let a = SubmissionId::new();
        let b = SubmissionId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_derived_ids_are_stable() {
        let a = SubmissionId::derived("pat@example.com|2024-01-01");
        let b = SubmissionId::derived("pat@example.com|2024-01-01");
        let c = SubmissionId::derived("pat@example.com|2024-01-02");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_from_raw_keeps_legacy_value() {
        let id = SubmissionId::from_raw("legacy-42");
        assert_eq!(id.as_str(), "legacy-42");
        assert_eq!(id.to_string(), "legacy-42");
    }

    #[test]
    fn test_serde_transparent() {
        let id = SubmissionId::from_raw("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""abc""#);

        let back: SubmissionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
