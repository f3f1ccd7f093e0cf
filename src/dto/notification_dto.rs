use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::notification::Notification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationPayload {
    pub title: Option<String>,
    pub status: Option<String>,
    pub body: Option<String>,
    /// Target for the per-user route; defaults to the caller.
    pub user_id: Option<Uuid>,
}

impl CreateNotificationPayload {
    pub fn has_content(&self) -> bool {
        self.title.is_some() || self.status.is_some() || self.body.is_some()
    }
}

/// Feed entry with sentinel fallbacks applied for absent fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub body: String,
    pub date: DateTime<Utc>,
}

impl From<Notification> for NotificationView {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title.unwrap_or_else(|| "Untitled".to_string()),
            status: n.status.unwrap_or_else(|| "No status".to_string()),
            body: n.body.unwrap_or_else(|| "No body".to_string()),
            date: n.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_fill_absent_fields() {
        let view = NotificationView::from(Notification {
            id: Uuid::new_v4(),
            principal_id: None,
            principal_kind: None,
            title: None,
            status: None,
            body: None,
            created_at: None,
        });
        assert_eq!(view.title, "Untitled");
        assert_eq!(view.status, "No status");
        assert_eq!(view.body, "No body");
    }

    #[test]
    fn present_fields_pass_through() {
        let view = NotificationView::from(Notification {
            id: Uuid::new_v4(),
            principal_id: None,
            principal_kind: None,
            title: Some("Casting call".into()),
            status: Some("New".into()),
            body: Some("Auditions open".into()),
            created_at: None,
        });
        assert_eq!(view.title, "Casting call");
        assert_eq!(view.status, "New");
        assert_eq!(view.body, "Auditions open");
    }

    #[test]
    fn content_check_requires_one_field() {
        let empty = CreateNotificationPayload {
            title: None,
            status: None,
            body: None,
            user_id: None,
        };
        assert!(!empty.has_content());

        let with_body = CreateNotificationPayload {
            title: None,
            status: None,
            body: Some("hello".into()),
            user_id: None,
        };
        assert!(with_body.has_content());
    }
}
