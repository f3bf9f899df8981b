use crate::handlers::{auth::ErrorResponse, classroom_error, MessageResponse};
use crate::middleware::CurrentUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use rollcall_classroom::CreatedSession;
use rollcall_models::{NewSession, SessionWithSubject};
use std::sync::Arc;
use uuid::Uuid;

/// Create an attendance session and return its QR code
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(request): Json<NewSession>,
) -> Result<Json<CreatedSession>, (StatusCode, Json<ErrorResponse>)> {
    let created = state
        .session_service
        .create(admin.user_id, request)
        .await
        .map_err(classroom_error)?;

    Ok(Json(created))
}

/// Invalidate an upcoming or active session
pub async fn invalidate_session(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .session_service
        .invalidate(admin.user_id, session_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(MessageResponse::new("Session invalidated successfully")))
}

/// Upcoming and active sessions of the requesting admin
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
) -> Result<Json<Vec<SessionWithSubject>>, (StatusCode, Json<ErrorResponse>)> {
    let sessions = state
        .session_service
        .list_open(admin.user_id)
        .await
        .map_err(classroom_error)?;

    Ok(Json(sessions))
}
