use crate::handlers::auth::ErrorResponse;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use rollcall_models::{Role, User};
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated user context, inserted into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub roll_number: Option<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            roll_number: user.roll_number,
        }
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "missing_auth_header",
                    "Authorization header is required",
                )),
            )
        })?
        .to_str()
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "invalid_auth_header",
                    "Invalid Authorization header format",
                )),
            )
        })?;

    if !auth_header.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(
                "invalid_auth_scheme",
                "Authorization header must use Bearer scheme",
            )),
        ));
    }

    Ok(auth_header[7..].to_string())
}

/// Validate the bearer token and load its user. Rejects revoked tokens
/// (logout clears the stored hash the token is checked against).
async fn authenticate(
    state: &crate::AppState,
    headers: &HeaderMap,
) -> Result<User, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_bearer_token(headers)?;

    state.auth_service.authenticate(&token).await.map_err(|e| {
        tracing::warn!("Authentication failed: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("invalid_token", &e.to_string())),
        )
    })
}

/// Middleware to require authentication
pub async fn require_auth(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let user = authenticate(&state, &headers).await?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

/// Middleware to require the admin role
pub async fn require_admin(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let user = authenticate(&state, &headers).await?;

    if user.role != Role::Admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(
                "admin_required",
                "This action requires the admin role",
            )),
        ));
    }

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

/// Middleware to require the student role
pub async fn require_student(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let user = authenticate(&state, &headers).await?;

    if user.role != Role::Student {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(
                "student_required",
                "This action requires the student role",
            )),
        ));
    }

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}
