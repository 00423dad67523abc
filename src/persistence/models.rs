//! Database row model for the `enrollments` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::{Enrollment, EnrollmentId};

/// A stored row from the `enrollments` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentRow {
    /// Store-generated primary key.
    pub id: i64,
    /// Student name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Course name.
    pub course: Option<String>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id: EnrollmentId::new(row.id),
            name: row.name,
            email: row.email,
            course: row.course,
        }
    }
}
