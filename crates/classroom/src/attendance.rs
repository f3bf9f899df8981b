use crate::error::{ClassroomError, Result};
use crate::geo;
use chrono::{DateTime, Timelike, Utc};
use rollcall_database::{AttendanceRepository, Database, EnrollmentRepository, SessionRepository};
use rollcall_models::{AttendanceHistoryEntry, AttendanceRecord, NewAttendanceRecord, SessionStatus};
use uuid::Uuid;

/// Maximum allowed distance between the scan and the classroom
const GEOFENCE_RADIUS_M: f64 = 50.0;

/// Drop seconds and sub-second precision. The scan-time window check works
/// at minute granularity so a scan is not rejected for sub-minute clock or
/// sweep skew.
fn truncate_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

pub struct AttendanceService {
    session_repo: SessionRepository,
    enrollment_repo: EnrollmentRepository,
    attendance_repo: AttendanceRepository,
}

impl AttendanceService {
    pub fn new(db: &Database) -> Self {
        Self {
            session_repo: SessionRepository::new(db.pool().clone()),
            enrollment_repo: EnrollmentRepository::new(db.pool().clone()),
            attendance_repo: AttendanceRepository::new(db.pool().clone()),
        }
    }

    /// Validate a scan and record attendance.
    ///
    /// Checks run in order and short-circuit: session token + status,
    /// time window (minute granularity, tolerating sweep lag), enrollment,
    /// geofence, then the insert whose unique constraint rejects a second
    /// mark for the same (student, session).
    pub async fn mark(
        &self,
        student_id: Uuid,
        token: &str,
        scan_lat: f64,
        scan_lng: f64,
    ) -> Result<AttendanceRecord> {
        let session = self
            .session_repo
            .find_by_token(token)
            .await?
            .ok_or(ClassroomError::SessionNotActive)?;

        if session.status != SessionStatus::Active {
            return Err(ClassroomError::SessionNotActive);
        }

        let now = truncate_to_minute(Utc::now());
        let window_start = truncate_to_minute(session.starts_at);
        let window_end = truncate_to_minute(session.ends_at);

        if now < window_start {
            return Err(ClassroomError::SessionNotStarted);
        }
        if now > window_end {
            return Err(ClassroomError::SessionExpired);
        }

        let enrolled = self
            .enrollment_repo
            .exists(student_id, session.subject_id)
            .await?;
        if !enrolled {
            return Err(ClassroomError::NotEnrolled);
        }

        geo::validate_coordinates(scan_lat, scan_lng)?;
        geo::validate_coordinates(session.classroom_lat, session.classroom_lng)?;

        let distance_m = geo::haversine_distance(
            scan_lat,
            scan_lng,
            session.classroom_lat,
            session.classroom_lng,
        );
        if distance_m > GEOFENCE_RADIUS_M {
            return Err(ClassroomError::OutOfRange { distance_m });
        }

        let record = self
            .attendance_repo
            .create(&NewAttendanceRecord {
                student_id,
                session_id: session.id,
                scan_lat,
                scan_lng,
            })
            .await
            .map_err(|e| match e {
                rollcall_database::DatabaseError::DuplicateEntry(_) => ClassroomError::AlreadyMarked,
                other => other.into(),
            })?;

        tracing::info!(
            "Attendance marked: student={} session={} distance={:.2}m",
            student_id,
            session.id,
            distance_m
        );

        Ok(record)
    }

    /// A student's attendance history, newest scan first
    pub async fn history(&self, student_id: Uuid) -> Result<Vec<AttendanceHistoryEntry>> {
        Ok(self.attendance_repo.history_for_student(student_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_truncate_to_minute() {
        assert_eq!(
            truncate_to_minute(ts("2025-03-10T10:00:59.750Z")),
            ts("2025-03-10T10:00:00Z")
        );
        assert_eq!(
            truncate_to_minute(ts("2025-03-10T10:00:00Z")),
            ts("2025-03-10T10:00:00Z")
        );
    }

    #[test]
    fn test_minute_granularity_forgives_trailing_seconds() {
        // A scan at 10:00:59 against a window ending at 10:00 is still
        // inside the window once both sides are truncated.
        let now = truncate_to_minute(ts("2025-03-10T10:00:59Z"));
        let window_end = truncate_to_minute(ts("2025-03-10T10:00:00Z"));
        assert!(now <= window_end);

        // One whole minute past the end is rejected
        let later = truncate_to_minute(ts("2025-03-10T10:01:05Z"));
        assert!(later > window_end);
    }
}
