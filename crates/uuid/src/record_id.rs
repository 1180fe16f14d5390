//! Canonical record identifiers.

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Namespace for deterministic (version 5) alert identifiers.
pub const ALERT_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a94_8d3e_4b7a_9e05_c4d8_1b27_a360);

/// Canonical identifier (32 lowercase hex characters, no hyphens).
///
/// Once constructed the contained UUID is guaranteed to be in canonical form.
///
/// # Construction
/// - [`RecordId::new`] generates a fresh random identifier.
/// - [`RecordId::parse`] validates an externally supplied identifier.
/// - [`RecordId::for_alert`] derives the identifier of an alert from its source reading and
///   metric tag.
///
/// # Errors
/// [`RecordId::parse`] returns [`UuidError::InvalidInput`] if the input is not already
/// canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordId {
    /// Generates a new random (version 4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derives a deterministic (version 5) identifier for an alert.
    ///
    /// `reading_key` identifies the source reading: patient identifier, reading identifier and
    /// recording time, taken verbatim even when empty. Each part is length-prefixed before hashing
    /// under [`ALERT_NAMESPACE`], so parts containing separators cannot collide with one another.
    /// The same reading and metric always map to the same alert identifier.
    pub fn for_alert(reading_key: &[&str], metric_tag: &str) -> Self {
        let name = reading_key
            .iter()
            .chain(std::iter::once(&metric_tag))
            .fold(String::new(), |mut name, part| {
                name.push_str(&part.len().to_string());
                name.push(':');
                name.push_str(part);
                name
            });
        Self(Uuid::new_v5(&ALERT_NAMESPACE, name.as_bytes()))
    }

    /// Validates and parses an identifier that must already be canonical.
    ///
    /// Hyphenated or uppercase forms are rejected rather than normalised.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "identifier must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("invalid identifier '{input}': {e}")))
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is in canonical form.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for RecordId {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_canonical_identifier() {
        let id = RecordId::new();
        let canonical = id.to_string();

        assert_eq!(canonical.len(), 32);
        assert!(RecordId::is_canonical(&canonical));
    }

    #[test]
    fn parse_accepts_canonical_identifier() {
        let canonical = "550e8400e29b41d4a716446655440000";
        let id = RecordId::parse(canonical).expect("canonical id should parse");
        assert_eq!(id.to_string(), canonical);
    }

    #[test]
    fn parse_rejects_hyphenated_identifier() {
        match RecordId::parse("550e8400-e29b-41d4-a716-446655440000") {
            Err(UuidError::InvalidInput(msg)) => {
                assert!(msg.contains("32 lowercase hex characters"));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_uppercase_and_wrong_length() {
        assert!(RecordId::parse("550E8400E29B41D4A716446655440000").is_err());
        assert!(RecordId::parse("550e8400e29b41d4a71644665544000").is_err());
        assert!(RecordId::parse("550e8400e29b41d4a7164466554400000").is_err());
        assert!(RecordId::parse("").is_err());
    }

    #[test]
    fn alert_ids_are_deterministic_per_reading_and_metric() {
        let key = ["pt-1", "reading-1", "2026-05-02T14:00:00+00:00"];
        let a = RecordId::for_alert(&key, "heartRate");
        let b = RecordId::for_alert(&key, "heartRate");
        let other_metric = RecordId::for_alert(&key, "temperature");
        let other_reading =
            RecordId::for_alert(&["pt-1", "reading-2", "2026-05-02T14:00:00+00:00"], "heartRate");

        assert_eq!(a, b);
        assert_ne!(a, other_metric);
        assert_ne!(a, other_reading);
        assert_eq!(a.uuid().get_version_num(), 5);
    }

    #[test]
    fn alert_ids_distinguish_patients_sharing_an_empty_reading_id() {
        let first = RecordId::for_alert(&["pt-A", "", "2026-05-02T14:00:00+00:00"], "heartRate");
        let second = RecordId::for_alert(&["pt-B", "", "2026-05-02T14:00:00+00:00"], "heartRate");
        assert_ne!(first, second);
        assert!(RecordId::is_canonical(&first.to_string()));
    }

    #[test]
    fn alert_id_parts_cannot_shift_across_separators() {
        let a = RecordId::for_alert(&["a/b", ""], "heartRate");
        let b = RecordId::for_alert(&["a", "b"], "heartRate");
        assert_ne!(a, b);
    }

    #[test]
    fn serde_uses_canonical_string() {
        let id = RecordId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400e29b41d4a716446655440000\"");

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<RecordId>("\"not-an-id\"").is_err());
    }
}
