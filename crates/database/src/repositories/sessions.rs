use crate::error::{DatabaseError, Result};
use chrono::{DateTime, Utc};
use rollcall_models::{Session, SessionStatus, SessionWithSubject};
use sqlx::PgPool;
use uuid::Uuid;

pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        subject_id: Uuid,
        admin_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        classroom_lat: f64,
        classroom_lng: f64,
        token: &str,
        status: SessionStatus,
    ) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions
                (subject_id, admin_id, starts_at, ends_at, classroom_lat, classroom_lng, token, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(subject_id)
        .bind(admin_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(classroom_lat)
        .bind(classroom_lng)
        .bind(token)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Session", &id.to_string()))?;

        Ok(session)
    }

    /// Resolve a session by its QR token
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Any non-invalidated session of this admin whose window intersects
    /// [starts_at, ends_at)?
    pub async fn has_overlap(
        &self,
        admin_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM sessions
            WHERE admin_id = $1
              AND status <> 'invalidated'
              AND starts_at < $3
              AND ends_at > $2
            "#,
        )
        .bind(admin_id)
        .bind(starts_at)
        .bind(ends_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Atomically invalidate a session that is still upcoming or active.
    /// Returns the updated row, or None when the session exists but has
    /// already reached a terminal state. The WHERE clause makes the
    /// transition race-free against the status sweeper.
    pub async fn invalidate_if_open(&self, id: Uuid, admin_id: Uuid) -> Result<Option<Session>> {
        // Ownership first so an unknown id maps to NotFound, not conflict
        self.find_owned(id, admin_id).await?;

        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions
            SET status = 'invalidated'
            WHERE id = $1 AND status IN ('upcoming', 'active')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn find_owned(&self, id: Uuid, admin_id: Uuid) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE id = $1 AND admin_id = $2",
        )
        .bind(id)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Session", &id.to_string()))?;

        Ok(session)
    }

    /// Upcoming and active sessions of an admin, newest first
    pub async fn list_open_for_admin(&self, admin_id: Uuid) -> Result<Vec<SessionWithSubject>> {
        let sessions = sqlx::query_as::<_, SessionWithSubject>(
            r#"
            SELECT se.id, se.subject_id, su.name AS subject_name,
                   se.starts_at, se.ends_at, se.status
            FROM sessions se
            INNER JOIN subjects su ON su.id = se.subject_id
            WHERE se.admin_id = $1 AND se.status IN ('upcoming', 'active')
            ORDER BY se.starts_at DESC
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    /// Active and expired sessions across the given subjects (student feed)
    pub async fn list_for_subjects(&self, subject_ids: &[Uuid]) -> Result<Vec<SessionWithSubject>> {
        let sessions = sqlx::query_as::<_, SessionWithSubject>(
            r#"
            SELECT se.id, se.subject_id, su.name AS subject_name,
                   se.starts_at, se.ends_at, se.status
            FROM sessions se
            INNER JOIN subjects su ON su.id = se.subject_id
            WHERE se.subject_id = ANY($1) AND se.status IN ('active', 'expired')
            ORDER BY se.starts_at DESC
            "#,
        )
        .bind(subject_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    /// Sessions of a subject that count towards attendance statistics
    /// (held or currently running, i.e. active or expired)
    pub async fn list_countable_for_subject(
        &self,
        subject_id: Uuid,
        admin_id: Uuid,
    ) -> Result<Vec<Session>> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT * FROM sessions
            WHERE subject_id = $1 AND admin_id = $2 AND status IN ('active', 'expired')
            ORDER BY starts_at DESC
            "#,
        )
        .bind(subject_id)
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    /// Sweep transition: upcoming sessions whose window has opened become
    /// active. Conditional update; never touches terminal rows.
    pub async fn activate_due(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET status = 'active'
            WHERE status = 'upcoming' AND starts_at <= $1 AND ends_at > $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Sweep transition: non-terminal sessions whose window has closed
    /// become expired.
    pub async fn expire_due(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET status = 'expired'
            WHERE status IN ('upcoming', 'active') AND ends_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
