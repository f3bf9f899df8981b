use crate::error::{is_unique_violation, DatabaseError, Result};
use rollcall_models::{AttendanceHistoryEntry, AttendanceRecord, NewAttendanceRecord};
use sqlx::PgPool;
use uuid::Uuid;

pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an attendance record with a server-side timestamp. The
    /// (student, session) unique constraint is the at-most-once guarantee:
    /// two concurrent scans race at the index, not in application code, and
    /// the loser gets DuplicateEntry.
    pub async fn create(&self, record: &NewAttendanceRecord) -> Result<AttendanceRecord> {
        let row = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records (student_id, session_id, scan_lat, scan_lng)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(record.student_id)
        .bind(record.session_id)
        .bind(record.scan_lat)
        .bind(record.scan_lng)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::duplicate("AttendanceRecord", "student and session")
            } else {
                e.into()
            }
        })?;

        Ok(row)
    }

    /// A student's attendance history with session and subject context
    pub async fn history_for_student(&self, student_id: Uuid) -> Result<Vec<AttendanceHistoryEntry>> {
        let entries = sqlx::query_as::<_, AttendanceHistoryEntry>(
            r#"
            SELECT a.id, a.session_id, su.name AS subject_name,
                   se.starts_at AS session_starts_at, a.scanned_at
            FROM attendance_records a
            INNER JOIN sessions se ON se.id = a.session_id
            INNER JOIN subjects su ON su.id = se.subject_id
            WHERE a.student_id = $1
            ORDER BY a.scanned_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// All records across the given sessions (attendance report)
    pub async fn list_for_sessions(&self, session_ids: &[Uuid]) -> Result<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance_records WHERE session_id = ANY($1)",
        )
        .bind(session_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
