use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One mark per (student, session); the database enforces the uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub session_id: Uuid,
    pub scanned_at: DateTime<Utc>,
    pub scan_lat: f64,
    pub scan_lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendanceRecord {
    pub student_id: Uuid,
    pub session_id: Uuid,
    pub scan_lat: f64,
    pub scan_lng: f64,
}

/// Attendance record joined with its session and subject, for the
/// student history view
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceHistoryEntry {
    pub id: Uuid,
    pub session_id: Uuid,
    pub subject_name: String,
    pub session_starts_at: DateTime<Utc>,
    pub scanned_at: DateTime<Utc>,
}
