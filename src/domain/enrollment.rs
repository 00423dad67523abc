//! Enrollment record model.
//!
//! The identity invariant ("`id` is set iff the record has been
//! persisted") is carried by two types: [`EnrollmentRecord`] is what the
//! caller hands to the store, with an optional id, and [`Enrollment`] is
//! what the store hands back, with a mandatory one.

use serde::{Deserialize, Serialize};

use super::EnrollmentId;

/// An enrollment as submitted for storage.
///
/// `id` is `None` for a first insert. When set, saving performs an upsert
/// on the primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentRecord {
    /// Primary key, absent before the first insert.
    pub id: Option<EnrollmentId>,
    /// Student name.
    pub name: Option<String>,
    /// Contact email. Not validated and not unique.
    pub email: Option<String>,
    /// Course the student enrolls in.
    pub course: Option<String>,
}

impl EnrollmentRecord {
    /// Builds an unsaved record with no id.
    #[must_use]
    pub fn new(name: Option<String>, email: Option<String>, course: Option<String>) -> Self {
        Self {
            id: None,
            name,
            email,
            course,
        }
    }

    /// Returns `true` once the record carries a store-assigned id.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// An enrollment as stored, always carrying its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Store-assigned primary key.
    pub id: EnrollmentId,
    /// Student name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Course name.
    pub course: Option<String>,
}

impl Enrollment {
    /// Attaches an id to the fields of `record`, discarding any id it held.
    #[must_use]
    pub fn from_record(id: EnrollmentId, record: EnrollmentRecord) -> Self {
        Self {
            id,
            name: record.name,
            email: record.email,
            course: record.course,
        }
    }
}

impl From<Enrollment> for EnrollmentRecord {
    fn from(e: Enrollment) -> Self {
        Self {
            id: Some(e.id),
            name: e.name,
            email: e.email,
            course: e.course,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_not_persisted() {
        let record = EnrollmentRecord::new(Some("Ana".into()), None, None);
        assert!(!record.is_persisted());
        assert_eq!(record.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn stored_enrollment_converts_back_with_id() {
        let stored = Enrollment::from_record(
            EnrollmentId::new(3),
            EnrollmentRecord::new(Some("Ana".into()), Some("ana@x.com".into()), Some("CS".into())),
        );
        let record = EnrollmentRecord::from(stored);
        assert!(record.is_persisted());
        assert_eq!(record.id, Some(EnrollmentId::new(3)));
        assert_eq!(record.course.as_deref(), Some("CS"));
    }
}
