use crate::error::{ClassroomError, Result};
use crate::{geo, qr};
use chrono::Utc;
use rollcall_database::{Database, SessionRepository, SubjectRepository};
use rollcall_models::{NewSession, Session, SessionStatus, SessionWithSubject};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A freshly created session together with its rendered QR code
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub token: String,
    pub qr_code: String,
}

pub struct SessionService {
    subject_repo: SubjectRepository,
    session_repo: SessionRepository,
}

impl SessionService {
    pub fn new(db: &Database) -> Self {
        Self {
            subject_repo: SubjectRepository::new(db.pool().clone()),
            session_repo: SessionRepository::new(db.pool().clone()),
        }
    }

    /// Create an attendance session and render its QR code.
    ///
    /// The window must be well-formed, the coordinates sane, and the window
    /// must not overlap any non-invalidated session of the same admin.
    pub async fn create(&self, admin_id: Uuid, request: NewSession) -> Result<CreatedSession> {
        request.validate()?;

        if request.starts_at >= request.ends_at {
            return Err(ClassroomError::InvalidWindow);
        }

        geo::validate_coordinates(request.lat, request.lng)?;

        // Subject must exist and belong to the requesting admin
        self.subject_repo
            .find_owned(request.subject_id, admin_id)
            .await
            .map_err(|_| ClassroomError::NotFound("Subject not found".to_string()))?;

        let has_overlap = self
            .session_repo
            .has_overlap(admin_id, request.starts_at, request.ends_at)
            .await?;
        if has_overlap {
            return Err(ClassroomError::OverlappingWindow);
        }

        let token = qr::generate_session_token();
        let status = SessionStatus::for_window(request.starts_at, request.ends_at, Utc::now());

        let session = self
            .session_repo
            .create(
                request.subject_id,
                admin_id,
                request.starts_at,
                request.ends_at,
                request.lat,
                request.lng,
                &token,
                status,
            )
            .await?;

        let qr_code = qr::render_data_url(&session.token)?;

        tracing::info!(
            "Session created: id={} subject={} status={:?}",
            session.id,
            session.subject_id,
            session.status
        );

        Ok(CreatedSession {
            session_id: session.id,
            status: session.status,
            token: session.token,
            qr_code,
        })
    }

    /// Invalidate an upcoming or active session. Terminal for the session;
    /// the conditional update in the repository makes this race-free
    /// against the status sweeper.
    pub async fn invalidate(&self, admin_id: Uuid, session_id: Uuid) -> Result<Session> {
        let session = self
            .session_repo
            .invalidate_if_open(session_id, admin_id)
            .await
            .map_err(|e| match e {
                rollcall_database::DatabaseError::NotFound(_) => {
                    ClassroomError::NotFound("Session not found".to_string())
                }
                other => other.into(),
            })?
            .ok_or(ClassroomError::SessionNotOpen)?;

        tracing::info!("Session invalidated: id={}", session.id);

        Ok(session)
    }

    /// Upcoming and active sessions of an admin, newest first
    pub async fn list_open(&self, admin_id: Uuid) -> Result<Vec<SessionWithSubject>> {
        Ok(self.session_repo.list_open_for_admin(admin_id).await?)
    }
}
