//! Service layer: business logic orchestration.
//!
//! [`EnrollmentService`] sits between the REST handlers and the
//! [`crate::persistence::EnrollmentRepository`].

pub mod enrollment_service;

pub use enrollment_service::EnrollmentService;
