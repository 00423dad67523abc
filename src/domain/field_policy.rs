//! Field acceptance policy applied before an enrollment is stored.

use super::EnrollmentRecord;

/// Which payloads the gateway accepts for storage.
///
/// The default is [`FieldPolicy::Permissive`]: every field is optional and
/// empty strings are stored as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Accept any combination of present, absent, or empty fields.
    #[default]
    Permissive,
    /// Require `name`, `email` and `course` to be present and non-empty.
    RequireAll,
}

impl FieldPolicy {
    /// Maps the `ENROLLMENT_REQUIRE_FIELDS` switch onto a policy.
    #[must_use]
    pub const fn from_require_fields(require: bool) -> Self {
        if require {
            Self::RequireAll
        } else {
            Self::Permissive
        }
    }

    /// Returns the names of the fields that violate this policy, in
    /// declaration order. An empty vector means the record is accepted.
    #[must_use]
    pub fn missing_fields(self, record: &EnrollmentRecord) -> Vec<&'static str> {
        match self {
            Self::Permissive => Vec::new(),
            Self::RequireAll => [
                ("name", &record.name),
                ("email", &record.email),
                ("course", &record.course),
            ]
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(field, _)| field)
            .collect(),
        }
    }
}
