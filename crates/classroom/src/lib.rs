pub mod attendance;
pub mod enrollments;
pub mod error;
pub mod geo;
pub mod qr;
pub mod sessions;
pub mod subjects;
pub mod sweeper;

pub use attendance::AttendanceService;
pub use enrollments::{BulkEnrollRequest, EnrollmentService, StudentRef, SubjectEnrollmentOutcome};
pub use error::{ClassroomError, Result};
pub use sessions::{CreatedSession, SessionService};
pub use subjects::{SubjectAttendanceReport, SubjectService};
pub use sweeper::{StatusSweeper, SweepStats, SweeperHandle};
