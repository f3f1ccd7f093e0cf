use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Append-only feed entry. `principal_id`/`principal_kind` are either
/// both set (targeted) or both NULL (global); the table CHECK enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub principal_id: Option<Uuid>,
    pub principal_kind: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub body: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
