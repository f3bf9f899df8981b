use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of an attendance session.
///
/// Time drives `Upcoming -> Active -> Expired`; an admin may invalidate an
/// upcoming or active session. `Expired` and `Invalidated` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
pub enum SessionStatus {
    Upcoming,
    Active,
    Expired,
    Invalidated,
}

impl SessionStatus {
    /// Status a session with the given window has at `now`, ignoring
    /// invalidation. Single source of truth for every time-driven
    /// transition: creation uses it directly, the sweeper applies the same
    /// predicates in SQL.
    pub fn for_window(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now >= ends_at {
            SessionStatus::Expired
        } else if now >= starts_at {
            SessionStatus::Active
        } else {
            SessionStatus::Upcoming
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Expired | SessionStatus::Invalidated)
    }

    /// Invalidation is only reachable from upcoming or active.
    pub fn can_invalidate(&self) -> bool {
        matches!(self, SessionStatus::Upcoming | SessionStatus::Active)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub admin_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub classroom_lat: f64,
    pub classroom_lng: f64,

    // Random hex secret; the entire QR payload
    #[serde(skip_serializing)]
    pub token: String,

    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

/// Create session request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSession {
    pub subject_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Session joined with its subject name, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionWithSubject {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub subject_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: SessionStatus,
}

/// Half-open interval intersection: two windows overlap iff each starts
/// before the other ends. Windows that merely touch do not overlap.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(minutes: i64) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-10T09:00:00Z").unwrap().with_timezone(&Utc)
            + Duration::minutes(minutes)
    }

    #[test]
    fn test_status_for_window() {
        let (start, end) = (at(0), at(60));

        assert_eq!(SessionStatus::for_window(start, end, at(-1)), SessionStatus::Upcoming);
        assert_eq!(SessionStatus::for_window(start, end, at(0)), SessionStatus::Active);
        assert_eq!(SessionStatus::for_window(start, end, at(59)), SessionStatus::Active);
        assert_eq!(SessionStatus::for_window(start, end, at(60)), SessionStatus::Expired);
        assert_eq!(SessionStatus::for_window(start, end, at(120)), SessionStatus::Expired);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SessionStatus::Upcoming.is_terminal());
        assert!(!SessionStatus::Active.is_terminal());
        assert!(SessionStatus::Expired.is_terminal());
        assert!(SessionStatus::Invalidated.is_terminal());
    }

    #[test]
    fn test_invalidation_gate() {
        assert!(SessionStatus::Upcoming.can_invalidate());
        assert!(SessionStatus::Active.can_invalidate());
        assert!(!SessionStatus::Expired.can_invalidate());
        assert!(!SessionStatus::Invalidated.can_invalidate());
    }

    #[test]
    fn test_windows_overlap() {
        // Proper overlap
        assert!(windows_overlap(at(0), at(60), at(30), at(90)));
        // Containment
        assert!(windows_overlap(at(0), at(60), at(10), at(20)));
        // Identical
        assert!(windows_overlap(at(0), at(60), at(0), at(60)));
        // Touching windows are fine
        assert!(!windows_overlap(at(0), at(60), at(60), at(120)));
        assert!(!windows_overlap(at(60), at(120), at(0), at(60)));
        // Disjoint
        assert!(!windows_overlap(at(0), at(30), at(90), at(120)));
    }
}
