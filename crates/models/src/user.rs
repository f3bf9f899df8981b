use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Account role. Admins manage subjects and sessions, students mark attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    // Required for students, NULL for admins
    pub roll_number: Option<String>,

    // SHA-256 of the currently issued bearer token; NULL when logged out
    #[serde(skip_serializing)]
    pub active_token_hash: Option<String>,

    // Password reset token (hashed) and its expiry
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    pub password: String,

    pub role: Role,

    #[validate(length(min = 1, max = 64))]
    pub roll_number: Option<String>,
}

/// Public view of a user, safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub roll_number: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            roll_number: user.roll_number,
        }
    }
}

/// Student listing row for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub roll_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Student.as_str(), "student");
    }

    #[test]
    fn test_profile_drops_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Student,
            roll_number: Some("CS-042".to_string()),
            active_token_hash: Some("token-hash".to_string()),
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        };

        let profile = UserProfile::from(user);
        assert_eq!(profile.roll_number.as_deref(), Some("CS-042"));
        assert_eq!(profile.role, Role::Student);
    }
}
