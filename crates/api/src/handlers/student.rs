use crate::handlers::{auth::ErrorResponse, classroom_error, MessageResponse};
use crate::middleware::CurrentUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use rollcall_models::{AttendanceHistoryEntry, EnrollmentWithSubject, SessionWithSubject};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    /// The QR payload: the session's opaque token
    pub token: String,
    pub lat: f64,
    pub lng: f64,
}

/// Mark attendance from a QR scan
pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    Extension(student): Extension<CurrentUser>,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .attendance_service
        .mark(student.user_id, &request.token, request.lat, request.lng)
        .await
        .map_err(classroom_error)?;

    Ok(Json(MessageResponse::new("Attendance marked successfully")))
}

/// The requesting student's attendance history
pub async fn attendance_history(
    State(state): State<Arc<AppState>>,
    Extension(student): Extension<CurrentUser>,
) -> Result<Json<Vec<AttendanceHistoryEntry>>, (StatusCode, Json<ErrorResponse>)> {
    let history = state
        .attendance_service
        .history(student.user_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(history))
}

/// Sessions of the subjects the requesting student is enrolled in
pub async fn sessions(
    State(state): State<Arc<AppState>>,
    Extension(student): Extension<CurrentUser>,
) -> Result<Json<Vec<SessionWithSubject>>, (StatusCode, Json<ErrorResponse>)> {
    let sessions = state
        .enrollment_service
        .sessions_for_student(student.user_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(sessions))
}

/// The requesting student's enrollments
pub async fn enrollments(
    State(state): State<Arc<AppState>>,
    Extension(student): Extension<CurrentUser>,
) -> Result<Json<Vec<EnrollmentWithSubject>>, (StatusCode, Json<ErrorResponse>)> {
    let enrollments = state
        .enrollment_service
        .list_for_student(student.user_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(enrollments))
}
