//! Domain layer: the enrollment record and its identity.
//!
//! Nothing here touches storage or HTTP; the persistence adapters and the
//! REST handlers both speak in these types.

pub mod enrollment;
pub mod enrollment_id;
pub mod field_policy;

pub use enrollment::{Enrollment, EnrollmentRecord};
pub use enrollment_id::EnrollmentId;
pub use field_policy::FieldPolicy;
