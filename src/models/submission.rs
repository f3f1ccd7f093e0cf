use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub principal_id: Uuid,
    pub subject: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}
