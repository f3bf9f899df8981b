use crate::handlers::{auth_error, MessageResponse};
use crate::middleware::CurrentUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use rollcall_auth::{AuthResponse, LoginRequest};
use rollcall_models::{NewUser, UserProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

/// Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)> {
    let response = state
        .auth_service
        .register(request)
        .await
        .map_err(auth_error)?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    let response = state.auth_service.login(request).await.map_err(auth_error)?;

    Ok(Json(response))
}

/// Logout: revoke the active bearer token
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth_service
        .logout(user.user_id)
        .await
        .map_err(auth_error)?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Current user's profile
pub async fn me(
    Extension(user): Extension<CurrentUser>,
) -> Json<UserProfile> {
    Json(UserProfile {
        id: user.user_id,
        name: user.name,
        email: user.email,
        role: user.role,
        roll_number: user.roll_number,
    })
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request a password-reset email. Always answers success so callers
/// cannot probe which emails exist.
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .password_reset_service
        .request_reset(&request.email)
        .await
        .map_err(auth_error)?;

    Ok(Json(MessageResponse::new(
        "If an account exists with that email, a password reset link has been sent",
    )))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Reset the password with an emailed token
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .password_reset_service
        .reset_password(&request.token, &request.new_password)
        .await
        .map_err(|e| match e {
            // A bad reset token is the caller's mistake, not a stale login
            rollcall_auth::AuthError::InvalidToken(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("invalid_token", &msg)),
            ),
            other => auth_error(other),
        })?;

    Ok(Json(MessageResponse::new("Password reset successfully")))
}
