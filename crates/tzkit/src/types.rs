//! Core types.

use std::fmt;

/// An opaque zone-database identifier (e.g. `America/Chicago`).
///
/// The mapping between identifiers and actual UTC offsets lives in the host
/// zone database, not here. Identifiers are compared by exact string
/// equality; surrounding whitespace is trimmed on construction and the value
/// is never otherwise normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(String);

impl ZoneId {
    /// Create an identifier from a raw string, trimming surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let zone = ZoneId::new("  America/Chicago \n");
        assert_eq!(zone.as_str(), "America/Chicago");
    }

    #[test]
    fn test_equality_is_exact() {
        assert_eq!(ZoneId::new("UTC"), ZoneId::new("UTC"));
        assert_ne!(ZoneId::new("UTC"), ZoneId::new("utc"));
        assert_ne!(ZoneId::new("America/Chicago"), ZoneId::new("America/New_York"));
    }

    #[test]
    fn test_display() {
        let zone = ZoneId::new("Europe/Lisbon");
        assert_eq!(zone.to_string(), "Europe/Lisbon");
    }

    #[test]
    fn test_is_empty() {
        assert!(ZoneId::new("   ").is_empty());
        assert!(!ZoneId::new("UTC").is_empty());
    }

    #[test]
    fn test_from_str_ref() {
        let zone: ZoneId = "Asia/Tokyo".into();
        assert_eq!(zone.as_str(), "Asia/Tokyo");
    }
}
