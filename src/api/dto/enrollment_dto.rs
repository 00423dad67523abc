//! Enrollment request/response DTOs.
//!
//! Wire names are declared here rather than inferred from the domain
//! model. `nome` and `curso` are accepted as aliases so clients written
//! against the Portuguese field names keep working.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Enrollment, EnrollmentRecord};

/// Request body for `POST /api/enrollments`.
///
/// Every field is optional. Unknown fields, including a client-supplied
/// `id`, are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateEnrollmentRequest {
    /// Student name.
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    /// Contact email. Not validated.
    #[serde(default)]
    pub email: Option<String>,
    /// Course to enroll in.
    #[serde(default, alias = "curso")]
    pub course: Option<String>,
}

impl From<CreateEnrollmentRequest> for EnrollmentRecord {
    fn from(req: CreateEnrollmentRequest) -> Self {
        Self::new(req.name, req.email, req.course)
    }
}

/// Response body for `POST /api/enrollments` (200 OK).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Student name, `null` if omitted.
    pub name: Option<String>,
    /// Contact email, `null` if omitted.
    pub email: Option<String>,
    /// Course, `null` if omitted.
    pub course: Option<String>,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.id.get(),
            name: e.name,
            email: e.email,
            course: e.course,
        }
    }
}
