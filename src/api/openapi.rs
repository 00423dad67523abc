//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{CreateEnrollmentRequest, EnrollmentResponse};
use super::handlers;
use super::handlers::system::HealthResponse;
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served at `/api-docs/openapi.json`
/// when the `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "enrollment-gateway", description = "Course enrollment registration API"),
    paths(
        handlers::enrollment::create_enrollment,
        handlers::system::health_handler,
    ),
    components(schemas(
        CreateEnrollmentRequest,
        EnrollmentResponse,
        ErrorResponse,
        ErrorBody,
        HealthResponse,
    )),
    tags(
        (name = "Enrollments", description = "Enrollment registration"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_enrollment_and_health_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/enrollments"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn document_carries_request_schema() {
        let doc = ApiDoc::openapi();
        let Some(components) = doc.components else {
            panic!("components missing");
        };
        assert!(components.schemas.contains_key("CreateEnrollmentRequest"));
        assert!(components.schemas.contains_key("EnrollmentResponse"));
    }
}
