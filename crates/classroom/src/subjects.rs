use crate::error::{ClassroomError, Result};
use chrono::{DateTime, Utc};
use rollcall_database::{
    AttendanceRepository, Database, EnrollmentRepository, SessionRepository, SubjectRepository,
};
use rollcall_models::{NewSubject, SessionStatus, StudentSummary, Subject};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

/// One attended session inside a student's report row
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportAttendanceEntry {
    pub session_id: Uuid,
    pub session_starts_at: DateTime<Utc>,
    pub scanned_at: DateTime<Utc>,
}

/// Per-student attendance statistics for a subject
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentAttendanceStats {
    pub student: StudentSummary,
    pub total_classes: usize,
    pub attended_classes: usize,
    pub attendance_percentage: u32,
    pub records: Vec<ReportAttendanceEntry>,
}

/// Per-session attendance totals for a subject
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionAttendanceSummary {
    pub id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub total_attendance: usize,
}

/// Attendance report for one subject: overall class count, per-student
/// stats, and per-session totals
#[derive(Debug, Serialize, Deserialize)]
pub struct SubjectAttendanceReport {
    pub subject_id: Uuid,
    pub total_classes: usize,
    pub student_stats: Vec<StudentAttendanceStats>,
    pub session_details: Vec<SessionAttendanceSummary>,
}

pub struct SubjectService {
    subject_repo: SubjectRepository,
    session_repo: SessionRepository,
    enrollment_repo: EnrollmentRepository,
    attendance_repo: AttendanceRepository,
}

impl SubjectService {
    pub fn new(db: &Database) -> Self {
        Self {
            subject_repo: SubjectRepository::new(db.pool().clone()),
            session_repo: SessionRepository::new(db.pool().clone()),
            enrollment_repo: EnrollmentRepository::new(db.pool().clone()),
            attendance_repo: AttendanceRepository::new(db.pool().clone()),
        }
    }

    /// Create a subject with a unique course code
    pub async fn create(&self, admin_id: Uuid, request: NewSubject) -> Result<Subject> {
        request.validate()?;

        let subject = self
            .subject_repo
            .create(&request.name, &request.course_code, admin_id)
            .await
            .map_err(|e| match e {
                rollcall_database::DatabaseError::DuplicateEntry(_) => {
                    ClassroomError::AlreadyExists("Course code already exists".to_string())
                }
                other => other.into(),
            })?;

        Ok(subject)
    }

    pub async fn list(&self, admin_id: Uuid) -> Result<Vec<Subject>> {
        Ok(self.subject_repo.list_for_admin(admin_id).await?)
    }

    /// Delete a subject owned by this admin. The schema cascades the delete
    /// to sessions, enrollments, and attendance records.
    pub async fn delete(&self, admin_id: Uuid, subject_id: Uuid) -> Result<()> {
        self.subject_repo
            .delete_owned(subject_id, admin_id)
            .await
            .map_err(|e| match e {
                rollcall_database::DatabaseError::NotFound(_) => {
                    ClassroomError::NotFound("Subject not found".to_string())
                }
                other => other.into(),
            })?;

        tracing::info!("Subject deleted: id={}", subject_id);

        Ok(())
    }

    /// Attendance report for a subject owned by this admin.
    ///
    /// Classes that count are sessions with status active or expired;
    /// invalidated and upcoming sessions are excluded from the statistics.
    pub async fn attendance_report(
        &self,
        admin_id: Uuid,
        subject_id: Uuid,
    ) -> Result<SubjectAttendanceReport> {
        self.subject_repo
            .find_owned(subject_id, admin_id)
            .await
            .map_err(|_| ClassroomError::NotFound("Subject not found".to_string()))?;

        let sessions = self
            .session_repo
            .list_countable_for_subject(subject_id, admin_id)
            .await?;
        let session_ids: Vec<Uuid> = sessions.iter().map(|s| s.id).collect();
        let total_classes = sessions.len();

        let students = self.enrollment_repo.students_for_subject(subject_id).await?;
        let records = self.attendance_repo.list_for_sessions(&session_ids).await?;

        let starts_by_session: HashMap<Uuid, DateTime<Utc>> =
            sessions.iter().map(|s| (s.id, s.starts_at)).collect();

        // Group attendance records per student
        let mut records_by_student: HashMap<Uuid, Vec<ReportAttendanceEntry>> = HashMap::new();
        let mut totals_by_session: HashMap<Uuid, usize> = HashMap::new();
        for record in &records {
            let session_starts_at = starts_by_session
                .get(&record.session_id)
                .copied()
                .unwrap_or(record.scanned_at);

            records_by_student
                .entry(record.student_id)
                .or_default()
                .push(ReportAttendanceEntry {
                    session_id: record.session_id,
                    session_starts_at,
                    scanned_at: record.scanned_at,
                });

            *totals_by_session.entry(record.session_id).or_default() += 1;
        }

        let student_stats = students
            .into_iter()
            .map(|student| {
                let records = records_by_student.remove(&student.id).unwrap_or_default();
                let attended_classes = records.len();
                let attendance_percentage = if total_classes > 0 {
                    ((attended_classes as f64 / total_classes as f64) * 100.0).round() as u32
                } else {
                    0
                };

                StudentAttendanceStats {
                    student,
                    total_classes,
                    attended_classes,
                    attendance_percentage,
                    records,
                }
            })
            .collect();

        let session_details = sessions
            .into_iter()
            .map(|session| SessionAttendanceSummary {
                id: session.id,
                starts_at: session.starts_at,
                ends_at: session.ends_at,
                status: session.status,
                total_attendance: totals_by_session.get(&session.id).copied().unwrap_or(0),
            })
            .collect();

        Ok(SubjectAttendanceReport {
            subject_id,
            total_classes,
            student_stats,
            session_details,
        })
    }
}
