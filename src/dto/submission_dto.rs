use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::submission_service::SubmissionRow;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSubmissionPayload {
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubmissionPayload {
    pub subject: Option<String>,
    pub description: Option<String>,
}

impl UpdateSubmissionPayload {
    pub fn is_empty(&self) -> bool {
        self.subject.as_deref().map_or(true, str::is_empty)
            && self.description.as_deref().map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOwnerView {
    pub id: Uuid,
    pub name: String,
    pub profile_pic: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionView {
    pub id: Uuid,
    pub subject: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub hirer: SubmissionOwnerView,
}

impl From<SubmissionRow> for SubmissionView {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            subject: row.subject,
            description: row.description,
            created_at: row.created_at,
            hirer: SubmissionOwnerView {
                id: row.principal_id,
                name: row.owner_name.unwrap_or_else(|| "Unknown Hirer".to_string()),
                profile_pic: row.owner_profile_pic,
                role: row.owner_role.unwrap_or_else(|| "Unknown Role".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_detected() {
        let payload = UpdateSubmissionPayload {
            subject: None,
            description: Some(String::new()),
        };
        assert!(payload.is_empty());

        let payload = UpdateSubmissionPayload {
            subject: Some("s".into()),
            description: None,
        };
        assert!(!payload.is_empty());
    }

    #[test]
    fn view_applies_owner_fallbacks() {
        let row = SubmissionRow {
            id: Uuid::new_v4(),
            principal_id: Uuid::new_v4(),
            subject: "Feedback".into(),
            description: "Great platform".into(),
            created_at: None,
            owner_name: None,
            owner_profile_pic: None,
            owner_role: None,
        };
        let view = SubmissionView::from(row);
        assert_eq!(view.hirer.name, "Unknown Hirer");
        assert_eq!(view.hirer.role, "Unknown Role");
    }
}
