//! Enrollment handlers: create.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CreateEnrollmentRequest, EnrollmentResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /api/enrollments`: register a new enrollment.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when strict field checking is
/// enabled and a field is missing, or [`GatewayError::PersistenceError`]
/// when the store fails.
#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = "Enrollments",
    summary = "Register an enrollment",
    description = "Stores the submitted enrollment and returns it with its store-assigned id. Fields are optional unless strict field checking is enabled.",
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment stored", body = EnrollmentResponse),
        (status = 400, description = "Missing required fields (strict mode only)", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    Json(req): Json<CreateEnrollmentRequest>,
) -> Result<Json<EnrollmentResponse>, GatewayError> {
    let enrollment = state
        .enrollment_service
        .create_enrollment(req.into())
        .await?;

    Ok(Json(enrollment.into()))
}

/// Enrollment routes, including the legacy `/api/matriculas` path.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(create_enrollment))
        .route("/matriculas", post(create_enrollment))
}
