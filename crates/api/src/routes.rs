use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Public + token-holder auth endpoints
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/reset-password", post(handlers::auth::reset_password))
        .route(
            "/logout",
            post(handlers::auth::logout)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/me",
            get(handlers::auth::me)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        );

    // Admin-only routes
    let admin_routes = Router::new()
        .route("/subject", post(handlers::subject::create_subject))
        .route("/subjects", get(handlers::subject::list_subjects))
        .route("/subject/:subject_id", delete(handlers::subject::delete_subject))
        .route(
            "/subject/:subject_id/attendance",
            get(handlers::subject::subject_attendance),
        )
        .route("/session", post(handlers::session::create_session))
        .route(
            "/session/:session_id/invalidate",
            put(handlers::session::invalidate_session),
        )
        .route("/sessions", get(handlers::session::list_sessions))
        .route("/enroll-students", post(handlers::enrollment::enroll_students))
        .route("/students", get(handlers::enrollment::list_students))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    // Student-only routes
    let student_routes = Router::new()
        .route("/mark-attendance", post(handlers::student::mark_attendance))
        .route("/attendance-history", get(handlers::student::attendance_history))
        .route("/sessions", get(handlers::student::sessions))
        .route("/enrollments", get(handlers::student::enrollments))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_student));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .nest("/student", student_routes)
        .with_state(state)
}
