use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub student_id: Uuid,
    pub subject_id: Uuid,
}

/// Enrollment joined with its subject, for the student dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentWithSubject {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub subject_name: String,
    pub course_code: String,
    pub admin_name: String,
    pub enrolled_at: DateTime<Utc>,
}
