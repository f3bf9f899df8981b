use crate::error::{is_unique_violation, DatabaseError, Result};
use rollcall_models::Subject;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SubjectRepository {
    pool: PgPool,
}

impl SubjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a subject. Duplicate course code surfaces as DuplicateEntry.
    pub async fn create(&self, name: &str, course_code: &str, admin_id: Uuid) -> Result<Subject> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"
            INSERT INTO subjects (name, course_code, admin_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(course_code)
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::duplicate("Subject", "course code")
            } else {
                e.into()
            }
        })?;

        Ok(subject)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Subject> {
        let subject = sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Subject", &id.to_string()))?;

        Ok(subject)
    }

    /// Find a subject owned by the given admin; 404 hides other admins' subjects.
    pub async fn find_owned(&self, id: Uuid, admin_id: Uuid) -> Result<Subject> {
        let subject = sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects WHERE id = $1 AND admin_id = $2",
        )
        .bind(id)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Subject", &id.to_string()))?;

        Ok(subject)
    }

    pub async fn list_for_admin(&self, admin_id: Uuid) -> Result<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects WHERE admin_id = $1 ORDER BY created_at DESC",
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    /// Look up several subjects at once (bulk enrollment)
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(subjects)
    }

    /// Delete a subject owned by the given admin. The schema cascades to
    /// sessions, enrollments, and attendance records.
    pub async fn delete_owned(&self, id: Uuid, admin_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1 AND admin_id = $2")
            .bind(id)
            .bind(admin_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Subject", &id.to_string()));
        }

        Ok(())
    }
}
