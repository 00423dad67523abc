//! Type-safe enrollment identifier.
//!
//! [`EnrollmentId`] is a newtype wrapper around the store-generated `i64`
//! primary key so that enrollment identifiers cannot be confused with
//! other integers (row counts, limits, timeouts).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a persisted enrollment.
///
/// Never generated in-process by the HTTP path: the persistence adapter
/// obtains it from the store's identity mechanism on first insert, and it
/// is immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(i64);

impl EnrollmentId {
    /// Wraps a raw primary-key value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw primary-key value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EnrollmentId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<EnrollmentId> for i64 {
    fn from(id: EnrollmentId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_integer() {
        let id = EnrollmentId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn serializes_as_bare_number() {
        let Ok(json) = serde_json::to_string(&EnrollmentId::new(7)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(EnrollmentId::new(1) < EnrollmentId::new(2));
        assert_eq!(i64::from(EnrollmentId::from(9)), 9);
    }
}
