use crate::handlers::{auth::ErrorResponse, classroom_error, MessageResponse};
use crate::middleware::CurrentUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use rollcall_classroom::SubjectAttendanceReport;
use rollcall_models::{NewSubject, Subject};
use std::sync::Arc;
use uuid::Uuid;

/// Create a subject
pub async fn create_subject(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(request): Json<NewSubject>,
) -> Result<Json<Subject>, (StatusCode, Json<ErrorResponse>)> {
    let subject = state
        .subject_service
        .create(admin.user_id, request)
        .await
        .map_err(classroom_error)?;

    Ok(Json(subject))
}

/// List the requesting admin's subjects
pub async fn list_subjects(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
) -> Result<Json<Vec<Subject>>, (StatusCode, Json<ErrorResponse>)> {
    let subjects = state
        .subject_service
        .list(admin.user_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(subjects))
}

/// Delete a subject owned by the requesting admin
pub async fn delete_subject(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .subject_service
        .delete(admin.user_id, subject_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(MessageResponse::new("Subject deleted successfully")))
}

/// Attendance report for a subject
pub async fn subject_attendance(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<SubjectAttendanceReport>, (StatusCode, Json<ErrorResponse>)> {
    let report = state
        .subject_service
        .attendance_report(admin.user_id, subject_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(report))
}
