pub mod auth;
pub mod enrollment;
pub mod health;
pub mod session;
pub mod student;
pub mod subject;

use auth::ErrorResponse;
use axum::{http::StatusCode, Json};
use rollcall_classroom::ClassroomError;

/// Simple success payload for operations with nothing else to return
#[derive(Debug, serde::Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Translate a classroom domain error into a status code and error body.
/// Storage failures get a generic message; the detail stays in the logs.
pub(crate) fn classroom_error(err: ClassroomError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        ClassroomError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        ClassroomError::AlreadyExists(_) => (StatusCode::CONFLICT, "already_exists"),
        ClassroomError::OverlappingWindow => (StatusCode::CONFLICT, "overlapping_session"),
        ClassroomError::AlreadyMarked => (StatusCode::CONFLICT, "already_marked"),
        ClassroomError::SessionNotOpen => (StatusCode::CONFLICT, "session_not_open"),
        ClassroomError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
        ClassroomError::InvalidWindow => (StatusCode::BAD_REQUEST, "invalid_window"),
        ClassroomError::InvalidCoordinates => (StatusCode::BAD_REQUEST, "invalid_coordinates"),
        ClassroomError::SessionNotActive => (StatusCode::BAD_REQUEST, "invalid_session"),
        ClassroomError::SessionNotStarted => (StatusCode::BAD_REQUEST, "session_not_started"),
        ClassroomError::SessionExpired => (StatusCode::BAD_REQUEST, "session_expired"),
        ClassroomError::OutOfRange { .. } => (StatusCode::BAD_REQUEST, "out_of_range"),
        ClassroomError::NotEnrolled => (StatusCode::FORBIDDEN, "not_enrolled"),
        ClassroomError::QrError(_) | ClassroomError::DatabaseError(_) => {
            tracing::error!("Internal error: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Internal server error")),
            );
        }
    };

    (status, Json(ErrorResponse::new(code, &err.to_string())))
}

/// Translate an auth error into a status code and error body
pub(crate) fn auth_error(err: rollcall_auth::AuthError) -> (StatusCode, Json<ErrorResponse>) {
    use rollcall_auth::AuthError;

    let (status, code) = match &err {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
        AuthError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "invalid_token"),
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "token_expired"),
        AuthError::WeakPassword(_) => (StatusCode::BAD_REQUEST, "weak_password"),
        AuthError::RollNumberRequired => (StatusCode::BAD_REQUEST, "roll_number_required"),
        AuthError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        AuthError::AlreadyExists(_) => (StatusCode::CONFLICT, "already_exists"),
        AuthError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        AuthError::PasswordHashError(_)
        | AuthError::JwtError(_)
        | AuthError::EmailError(_)
        | AuthError::DatabaseError(_)
        | AuthError::Internal(_) => {
            tracing::error!("Internal error: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Internal server error")),
            );
        }
    };

    (status, Json(ErrorResponse::new(code, &err.to_string())))
}
