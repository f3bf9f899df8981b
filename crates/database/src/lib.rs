pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{Database, DatabaseConfig};
pub use error::{DatabaseError, Result};
pub use repositories::{
    attendance::AttendanceRepository,
    enrollments::EnrollmentRepository,
    sessions::SessionRepository,
    subjects::SubjectRepository,
    users::UserRepository,
};
