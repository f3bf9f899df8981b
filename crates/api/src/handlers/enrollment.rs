use crate::handlers::{auth::ErrorResponse, classroom_error};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use rollcall_classroom::{BulkEnrollRequest, SubjectEnrollmentOutcome};
use rollcall_models::StudentSummary;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct EnrollStudentsResponse {
    pub results: Vec<SubjectEnrollmentOutcome>,
}

/// Bulk-enroll students (matched by roll number) into subjects
pub async fn enroll_students(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkEnrollRequest>,
) -> Result<(StatusCode, Json<EnrollStudentsResponse>), (StatusCode, Json<ErrorResponse>)> {
    let results = state
        .enrollment_service
        .bulk_enroll(request)
        .await
        .map_err(classroom_error)?;

    Ok((StatusCode::CREATED, Json(EnrollStudentsResponse { results })))
}

/// List every registered student
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudentSummary>>, (StatusCode, Json<ErrorResponse>)> {
    let students = state
        .enrollment_service
        .list_students()
        .await
        .map_err(classroom_error)?;

    Ok(Json(students))
}
