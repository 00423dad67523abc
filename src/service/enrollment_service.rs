//! Enrollment service: applies the field policy and stores the record.

use std::sync::Arc;

use crate::domain::{Enrollment, EnrollmentRecord, FieldPolicy};
use crate::error::GatewayError;
use crate::persistence::EnrollmentRepository;

/// Orchestration layer for enrollment creation.
///
/// Stateless coordinator: owns the storage gateway handle and the field
/// policy chosen at startup. Holds no locks of its own.
#[derive(Debug, Clone)]
pub struct EnrollmentService {
    repository: Arc<dyn EnrollmentRepository>,
    policy: FieldPolicy,
}

impl EnrollmentService {
    /// Creates a new `EnrollmentService`.
    #[must_use]
    pub fn new(repository: Arc<dyn EnrollmentRepository>, policy: FieldPolicy) -> Self {
        Self { repository, policy }
    }

    /// Returns the storage gateway this service writes to.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn EnrollmentRepository> {
        &self.repository
    }

    /// Stores a new enrollment and returns it with its assigned id.
    ///
    /// Any id already present on `record` is discarded so that the store
    /// always generates one.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the field policy rejects
    /// the record, or a [`GatewayError::PersistenceError`] if the store
    /// fails.
    pub async fn create_enrollment(
        &self,
        mut record: EnrollmentRecord,
    ) -> Result<Enrollment, GatewayError> {
        let missing = self.policy.missing_fields(&record);
        if !missing.is_empty() {
            return Err(GatewayError::InvalidRequest(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        record.id = None;
        let enrollment = self.repository.save(record).await?;

        tracing::info!(
            enrollment_id = %enrollment.id,
            backend = %self.repository.backend(),
            "enrollment created"
        );
        Ok(enrollment)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EnrollmentId;
    use crate::persistence::InMemoryEnrollmentRepository;
    use tokio_test::assert_ok;

    fn make_service(policy: FieldPolicy) -> EnrollmentService {
        EnrollmentService::new(Arc::new(InMemoryEnrollmentRepository::new()), policy)
    }

    fn ana() -> EnrollmentRecord {
        EnrollmentRecord::new(
            Some("Ana".to_string()),
            Some("ana@x.com".to_string()),
            Some("CS".to_string()),
        )
    }

    #[tokio::test]
    async fn create_passes_fields_through() {
        let service = make_service(FieldPolicy::Permissive);
        let Ok(saved) = service.create_enrollment(ana()).await else {
            panic!("create failed");
        };
        assert_eq!(saved.name.as_deref(), Some("Ana"));
        assert_eq!(saved.email.as_deref(), Some("ana@x.com"));
        assert_eq!(saved.course.as_deref(), Some("CS"));

        let stored = service.repository().find_by_id(saved.id).await;
        assert!(matches!(stored, Ok(Some(ref e)) if *e == saved));
    }

    #[tokio::test]
    async fn client_supplied_id_is_ignored() {
        let service = make_service(FieldPolicy::Permissive);
        let mut forged = ana();
        forged.id = Some(EnrollmentId::new(999));

        let Ok(saved) = service.create_enrollment(forged).await else {
            panic!("create failed");
        };
        assert_eq!(saved.id, EnrollmentId::new(1));
        assert!(matches!(
            service.repository().find_by_id(EnrollmentId::new(999)).await,
            Ok(None)
        ));
    }

    #[tokio::test]
    async fn identical_payloads_create_distinct_records() {
        let service = make_service(FieldPolicy::Permissive);
        let Ok(a) = service.create_enrollment(ana()).await else {
            panic!("create failed");
        };
        let Ok(b) = service.create_enrollment(ana()).await else {
            panic!("create failed");
        };
        assert_ne!(a.id, b.id);
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn permissive_policy_stores_empty_record() {
        let service = make_service(FieldPolicy::Permissive);
        assert_ok!(service.create_enrollment(EnrollmentRecord::default()).await);
    }

    #[tokio::test]
    async fn strict_policy_rejects_without_writing() {
        let service = make_service(FieldPolicy::RequireAll);
        let partial = EnrollmentRecord::new(Some("Ana".to_string()), None, Some(String::new()));

        let Err(err) = service.create_enrollment(partial).await else {
            panic!("partial record must be rejected");
        };
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
        assert_eq!(
            err.to_string(),
            "invalid request: missing required fields: email, course"
        );
        assert!(matches!(service.repository().find_all().await, Ok(ref v) if v.is_empty()));
    }
}
