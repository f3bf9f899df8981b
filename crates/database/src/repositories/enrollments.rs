use crate::error::{is_unique_violation, DatabaseError, Result};
use rollcall_models::{Enrollment, EnrollmentWithSubject};
use sqlx::PgPool;
use uuid::Uuid;

pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enroll a student in a subject. The (student, subject) unique
    /// constraint turns a repeat into DuplicateEntry.
    pub async fn create(&self, student_id: Uuid, subject_id: Uuid) -> Result<Enrollment> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (student_id, subject_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::duplicate("Enrollment", "student and subject")
            } else {
                e.into()
            }
        })?;

        Ok(enrollment)
    }

    /// Does this student hold an enrollment for this subject?
    pub async fn exists(&self, student_id: Uuid, subject_id: Uuid) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = $1 AND subject_id = $2",
        )
        .bind(student_id)
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Subject ids a student is already enrolled in, restricted to the given set
    pub async fn enrolled_subject_ids(
        &self,
        student_id: Uuid,
        subject_ids: &[Uuid],
    ) -> Result<Vec<Uuid>> {
        let ids: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT subject_id FROM enrollments
            WHERE student_id = $1 AND subject_id = ANY($2)
            "#,
        )
        .bind(student_id)
        .bind(subject_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// All subject ids a student is enrolled in
    pub async fn subject_ids_for_student(&self, student_id: Uuid) -> Result<Vec<Uuid>> {
        let ids: Vec<(Uuid,)> =
            sqlx::query_as("SELECT subject_id FROM enrollments WHERE student_id = $1")
                .bind(student_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Enrollments of a student with subject and owning-admin names
    pub async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<EnrollmentWithSubject>> {
        let enrollments = sqlx::query_as::<_, EnrollmentWithSubject>(
            r#"
            SELECT e.id, e.subject_id, s.name AS subject_name, s.course_code,
                   u.name AS admin_name, e.enrolled_at
            FROM enrollments e
            INNER JOIN subjects s ON s.id = e.subject_id
            INNER JOIN users u ON u.id = s.admin_id
            WHERE e.student_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    /// Enrolled students of a subject (attendance report rows)
    pub async fn students_for_subject(
        &self,
        subject_id: Uuid,
    ) -> Result<Vec<rollcall_models::StudentSummary>> {
        let students = sqlx::query_as::<_, rollcall_models::StudentSummary>(
            r#"
            SELECT u.id, u.name, u.email, u.roll_number
            FROM enrollments e
            INNER JOIN users u ON u.id = e.student_id
            WHERE e.subject_id = $1
            ORDER BY u.roll_number
            "#,
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }
}
