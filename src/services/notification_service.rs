use crate::error::{Error, Result};
use crate::models::notification::Notification;
use crate::models::principal::PrincipalKind;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Global notification: both reference columns stay NULL.
    pub async fn send_to_all(
        &self,
        title: Option<&str>,
        status: Option<&str>,
        body: Option<&str>,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (title, status, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(status)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    /// Targeted notification. The target's kind is recorded from its row,
    /// never taken from the caller.
    pub async fn send_to_user(
        &self,
        target_id: Uuid,
        title: Option<&str>,
        status: Option<&str>,
        body: Option<&str>,
    ) -> Result<Notification> {
        let target: Option<(String,)> =
            sqlx::query_as("SELECT kind FROM principals WHERE id = $1")
                .bind(target_id)
                .fetch_optional(&self.pool)
                .await?;
        let Some((kind,)) = target else {
            return Err(Error::NotFound("User not found".to_string()));
        };

        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (principal_id, principal_kind, title, status, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(target_id)
        .bind(kind)
        .bind(title)
        .bind(status)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    pub async fn global_feed(&self) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE principal_id IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if notifications.is_empty() {
            return Err(Error::NotFound(
                "No global notifications found".to_string(),
            ));
        }
        Ok(notifications)
    }

    /// Everything targeted at this principal plus the global feed,
    /// newest-first. Empty is a valid outcome here.
    pub async fn user_feed(
        &self,
        principal_id: Uuid,
        kind: PrincipalKind,
    ) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE (principal_id = $1 AND principal_kind = $2)
               OR principal_id IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(principal_id)
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }
}
