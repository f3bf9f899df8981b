use crate::error::{is_unique_violation, DatabaseError, Result};
use chrono::{DateTime, Utc};
use rollcall_models::{Role, StudentSummary, User};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user. Duplicate email or roll number surfaces as
    /// DuplicateEntry via the unique constraints.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        roll_number: Option<&str>,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, roll_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(roll_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::duplicate("User", "email or roll number")
            } else {
                e.into()
            }
        })?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", &id.to_string()))?;

        Ok(user)
    }

    /// Find user by email, if any
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a student by roll number
    pub async fn find_student_by_roll_number(&self, roll_number: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE roll_number = $1 AND role = 'student'",
        )
        .bind(roll_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List every student, for the admin enrollment dashboard
    pub async fn list_students(&self) -> Result<Vec<StudentSummary>> {
        let students = sqlx::query_as::<_, StudentSummary>(
            r#"
            SELECT id, name, email, roll_number FROM users
            WHERE role = 'student'
            ORDER BY roll_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Record the hash of the currently issued bearer token
    pub async fn set_active_token_hash(&self, id: Uuid, token_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET active_token_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Clear the active token (logout)
    pub async fn clear_active_token_hash(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET active_token_hash = NULL WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Store a hashed password-reset token and its expiry
    pub async fn set_reset_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET reset_token_hash = $2, reset_token_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find the user holding an unexpired reset token with this hash
    pub async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE reset_token_hash = $1 AND reset_token_expires_at > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Set a new password hash, clearing the reset token and revoking the
    /// active bearer token in the same statement.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2,
                reset_token_hash = NULL,
                reset_token_expires_at = NULL,
                active_token_hash = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
