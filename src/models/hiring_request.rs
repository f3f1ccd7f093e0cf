use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of a request: Pending on creation, Accepted on consent.
/// Rejection is not stored; a rejected request is deleted outright, so
/// only two states ever appear in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
        }
    }

    /// Statuses a talent may move a request to.
    pub fn is_transition_target(&self) -> bool {
        matches!(self, RequestStatus::Accepted | RequestStatus::Rejected)
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(RequestStatus::Pending),
            "Accepted" => Ok(RequestStatus::Accepted),
            "Rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("Invalid status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HiringRequest {
    pub id: Uuid,
    pub hirer_id: Uuid,
    pub talent_id: Uuid,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values() {
        assert_eq!("Accepted".parse::<RequestStatus>(), Ok(RequestStatus::Accepted));
        assert_eq!("Rejected".parse::<RequestStatus>(), Ok(RequestStatus::Rejected));
        assert_eq!("Pending".parse::<RequestStatus>(), Ok(RequestStatus::Pending));
        assert!("accepted".parse::<RequestStatus>().is_err());
        assert!("Cancelled".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn only_accept_and_reject_are_transition_targets() {
        assert!(RequestStatus::Accepted.is_transition_target());
        assert!(RequestStatus::Rejected.is_transition_target());
        assert!(!RequestStatus::Pending.is_transition_target());
    }
}
