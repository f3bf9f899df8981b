pub mod attendance;
pub mod enrollments;
pub mod sessions;
pub mod subjects;
pub mod users;
