use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassroomError>;

#[derive(Debug, Error)]
pub enum ClassroomError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session start must be before session end")]
    InvalidWindow,

    #[error("Invalid coordinates")]
    InvalidCoordinates,

    #[error("Session window overlaps with another session")]
    OverlappingWindow,

    #[error("Invalid or inactive session")]
    SessionNotActive,

    #[error("Session has not started yet")]
    SessionNotStarted,

    #[error("Session expired")]
    SessionExpired,

    #[error("Only active or upcoming sessions can be invalidated")]
    SessionNotOpen,

    #[error("Not enrolled in subject")]
    NotEnrolled,

    #[error("You are {distance_m:.2} meters away from the classroom")]
    OutOfRange { distance_m: f64 },

    #[error("Attendance already marked")]
    AlreadyMarked,

    #[error("QR code generation failed: {0}")]
    QrError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rollcall_database::DatabaseError),
}

impl From<validator::ValidationErrors> for ClassroomError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClassroomError::InvalidInput(err.to_string())
    }
}
