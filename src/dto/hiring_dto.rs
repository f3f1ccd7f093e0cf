use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::hiring_service::{HirerRequestRow, TalentRequestRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequestPayload {
    pub talent_id: Uuid,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusPayload {
    pub request_id: Uuid,
    pub status: String,
}

/// Public display fields of one side of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyView {
    pub id: Uuid,
    pub name: String,
    pub profile_pic: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentRequestView {
    pub id: Uuid,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub hirer: PartyView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HirerRequestView {
    pub id: Uuid,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub hirer: PartyView,
    pub talent: PartyView,
}

impl From<TalentRequestRow> for TalentRequestView {
    fn from(row: TalentRequestRow) -> Self {
        Self {
            id: row.id,
            message: row.message,
            status: row.status,
            created_at: row.created_at,
            hirer: PartyView {
                id: row.hirer_id,
                name: row.hirer_name.unwrap_or_else(|| "Unknown Hirer".to_string()),
                profile_pic: row.hirer_profile_pic,
                role: row.hirer_role.unwrap_or_else(|| "Unknown Role".to_string()),
            },
        }
    }
}

impl From<HirerRequestRow> for HirerRequestView {
    fn from(row: HirerRequestRow) -> Self {
        Self {
            id: row.id,
            message: row.message,
            status: row.status,
            created_at: row.created_at,
            hirer: PartyView {
                id: row.hirer_id,
                name: row.hirer_name.unwrap_or_else(|| "Unknown Hirer".to_string()),
                profile_pic: row.hirer_profile_pic,
                role: row.hirer_role.unwrap_or_else(|| "Unknown Role".to_string()),
            },
            talent: PartyView {
                id: row.talent_id,
                name: row
                    .talent_name
                    .unwrap_or_else(|| "Unknown Talent".to_string()),
                profile_pic: row.talent_profile_pic,
                role: row.talent_role.unwrap_or_else(|| "Unknown Role".to_string()),
            },
        }
    }
}
