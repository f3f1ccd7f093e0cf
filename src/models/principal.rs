use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const GENDERS: &[&str] = &["Male", "Female"];

pub const HIRER_ROLES: &[&str] = &[
    "Director",
    "Assistant Director",
    "Casting Director",
    "Event Manager",
    "Other",
];

pub const TALENT_ROLES: &[&str] = &[
    "Actor",
    "Model",
    "Actor/Model",
    "MakeupArtist",
    "Cinematographer",
];

/// Discriminator between the two account populations. Stored as TEXT in
/// the single `principals` table so one lookup resolves any subject id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalKind {
    Hirer,
    Talent,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Hirer => "Hirer",
            PrincipalKind::Talent => "Talent",
        }
    }

    /// Display literal used when a referenced principal's name is missing.
    pub fn unknown_name(&self) -> &'static str {
        match self {
            PrincipalKind::Hirer => "Unknown Hirer",
            PrincipalKind::Talent => "Unknown Talent",
        }
    }

    pub fn roles(&self) -> &'static [&'static str] {
        match self {
            PrincipalKind::Hirer => HIRER_ROLES,
            PrincipalKind::Talent => TALENT_ROLES,
        }
    }
}

impl std::str::FromStr for PrincipalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hirer" => Ok(PrincipalKind::Hirer),
            "Talent" => Ok(PrincipalKind::Talent),
            other => Err(format!("Unknown principal kind: {}", other)),
        }
    }
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `principals` table. Hirer-only and talent-only profile
/// columns are nullable and simply stay NULL for the other kind.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Principal {
    pub id: Uuid,
    pub kind: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub role: String,
    pub password_hash: String,
    pub otp: Option<String>,
    pub is_verified: bool,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub device_token: Option<String>,
    pub age: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub profile_pic_url: Option<String>,
    pub profile_pic_id: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub body_type: Option<String>,
    pub skin_tone: Option<String>,
    pub language: Option<String>,
    pub skills: Option<String>,
    pub images: Option<JsonValue>,
    pub video: Option<JsonValue>,
    pub makeover_needed: Option<bool>,
    pub willing_to_work_as_extra: Option<bool>,
    pub about_yourself: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self.kind.as_str() {
            "Talent" => PrincipalKind::Talent,
            _ => PrincipalKind::Hirer,
        }
    }

    /// Url of an uploaded image slot (`front`, `left`, `right`, `profilePic`).
    pub fn image_url(&self, slot: &str) -> Option<String> {
        self.images
            .as_ref()
            .and_then(|imgs| imgs.get(slot))
            .and_then(|entry| entry.get("url"))
            .and_then(|url| url.as_str())
            .map(|url| url.to_string())
    }

    /// Storage id of an uploaded image slot, used to delete the old file
    /// before storing a replacement.
    pub fn image_id(&self, slot: &str) -> Option<String> {
        self.images
            .as_ref()
            .and_then(|imgs| imgs.get(slot))
            .and_then(|entry| entry.get("id"))
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
    }

    pub fn video_url(&self) -> Option<String> {
        self.video
            .as_ref()
            .and_then(|v| v.get("url"))
            .and_then(|url| url.as_str())
            .map(|url| url.to_string())
    }

    pub fn video_id(&self) -> Option<String> {
        self.video
            .as_ref()
            .and_then(|v| v.get("id"))
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
    }
}

pub fn is_valid_gender(gender: &str) -> bool {
    GENDERS.contains(&gender)
}

pub fn is_valid_role(kind: PrincipalKind, role: &str) -> bool {
    kind.roles().contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_both_variants() {
        assert_eq!("Hirer".parse::<PrincipalKind>(), Ok(PrincipalKind::Hirer));
        assert_eq!("Talent".parse::<PrincipalKind>(), Ok(PrincipalKind::Talent));
        assert!("Admin".parse::<PrincipalKind>().is_err());
    }

    #[test]
    fn role_validation_is_kind_specific() {
        assert!(is_valid_role(PrincipalKind::Hirer, "Casting Director"));
        assert!(!is_valid_role(PrincipalKind::Hirer, "Actor"));
        assert!(is_valid_role(PrincipalKind::Talent, "Actor/Model"));
        assert!(!is_valid_role(PrincipalKind::Talent, "Event Manager"));
    }

    #[test]
    fn image_accessors_read_nested_slots() {
        let p = Principal {
            id: Uuid::new_v4(),
            kind: "Talent".into(),
            name: "T".into(),
            email: "t@example.com".into(),
            phone: "123".into(),
            gender: "Female".into(),
            role: "Model".into(),
            password_hash: "x".into(),
            otp: None,
            is_verified: true,
            reset_token: None,
            reset_token_expires_at: None,
            device_token: None,
            age: None,
            country: None,
            city: None,
            profile_pic_url: None,
            profile_pic_id: None,
            height: None,
            weight: None,
            body_type: None,
            skin_tone: None,
            language: None,
            skills: None,
            images: Some(serde_json::json!({
                "front": { "url": "/uploads/a.jpg", "id": "a" }
            })),
            video: Some(serde_json::json!({ "url": "/uploads/v.mp4", "id": "v" })),
            makeover_needed: None,
            willing_to_work_as_extra: None,
            about_yourself: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(p.image_url("front").as_deref(), Some("/uploads/a.jpg"));
        assert_eq!(p.image_id("front").as_deref(), Some("a"));
        assert_eq!(p.image_url("left"), None);
        assert_eq!(p.video_url().as_deref(), Some("/uploads/v.mp4"));
        assert_eq!(p.video_id().as_deref(), Some("v"));
    }
}
