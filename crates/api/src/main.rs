// Rollcall API Server
// REST API for the QR-code class attendance system

mod config;
mod handlers;
mod middleware;
mod routes;

use config::Config;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub auth_service: rollcall_auth::AuthService,
    pub password_reset_service: Arc<rollcall_auth::PasswordResetService>,
    pub subject_service: rollcall_classroom::SubjectService,
    pub enrollment_service: rollcall_classroom::EnrollmentService,
    pub session_service: rollcall_classroom::SessionService,
    pub attendance_service: rollcall_classroom::AttendanceService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,rollcall_api=debug,tower_http=debug".to_string()),
        )
        .init();

    tracing::info!("Starting Rollcall API server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Server: {}:{}", config.server_host, config.server_port);

    // Initialize database
    tracing::info!("Connecting to database...");
    let database = rollcall_database::Database::new(config.database.clone())
        .await
        .expect("Failed to connect to database");
    database.migrate().await.expect("Database migration failed");
    database.ping().await.expect("Database ping failed");
    tracing::info!("Database connected");

    // Initialize JWT service
    let jwt_service = rollcall_auth::JwtService::from_env();
    tracing::info!("JWT service initialized");

    // Create auth service
    let auth_service = rollcall_auth::AuthService::new(database.clone(), jwt_service);
    tracing::info!("Auth service initialized");

    // Create email + password reset services
    let email_service = rollcall_auth::EmailService::from_env()
        .expect("Failed to initialize email service");
    let password_reset_service = Arc::new(rollcall_auth::PasswordResetService::new(
        database.clone(),
        email_service,
        config.base_url.clone(),
    ));
    tracing::info!("Password reset service initialized");

    // Create classroom services
    let subject_service = rollcall_classroom::SubjectService::new(&database);
    let enrollment_service = rollcall_classroom::EnrollmentService::new(&database);
    let session_service = rollcall_classroom::SessionService::new(&database);
    let attendance_service = rollcall_classroom::AttendanceService::new(&database);
    tracing::info!("Classroom services initialized");

    // Start the session status sweeper
    let sweeper = rollcall_classroom::StatusSweeper::new(
        &database,
        Duration::from_secs(config.sweep_interval_secs),
    )
    .spawn();

    // Create app state
    let state = Arc::new(AppState {
        auth_service,
        password_reset_service,
        subject_service,
        enrollment_service,
        session_service,
        attendance_service,
    });

    // Create router
    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server ready at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for shutdown signal");
            tracing::info!("Shutdown signal received");
        })
        .await?;

    // Stop the sweeper before exiting
    sweeper.stop().await;
    database.close().await;

    Ok(())
}
