use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub course_code: String,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Create subject request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSubject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 32))]
    pub course_code: String,
}
