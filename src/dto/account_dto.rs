use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::models::principal::Principal;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub gender: String,
    pub role: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub device_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub device_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpPayload {
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordPayload {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordPayload {
    #[validate(length(min = 6))]
    pub new_password: String,
}

/// Login/verify response: identity summary plus a fresh session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Self profile with credential fields stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub kind: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub role: String,
    pub is_verified: bool,
    pub device_token: Option<String>,
    pub age: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub profile_pic_url: Option<String>,
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

impl From<Principal> for ProfileView {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            kind: p.kind,
            name: p.name,
            email: p.email,
            phone: p.phone,
            gender: p.gender,
            role: p.role,
            is_verified: p.is_verified,
            device_token: p.device_token,
            age: p.age,
            country: p.country,
            city: p.city,
            profile_pic_url: p.profile_pic_url,
            height: p.height,
            weight: p.weight,
            body_type: p.body_type,
            skin_tone: p.skin_tone,
            language: p.language,
            skills: p.skills,
            images: p.images,
            video: p.video,
            makeover_needed: p.makeover_needed,
            willing_to_work_as_extra: p.willing_to_work_as_extra,
            about_yourself: p.about_yourself,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Entry of the all-talents listing. Contact fields are blank unless an
/// Accepted hiring request connects the calling hirer to this talent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentCard {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub gender: String,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub body_type: Option<String>,
    pub skin_tone: Option<String>,
    pub language: Option<String>,
    pub skills: Option<String>,
    pub profile_pic: Option<String>,
    pub front_image: Option<String>,
    pub left_image: Option<String>,
    pub right_image: Option<String>,
    pub video: Option<String>,
    pub makeover_needed: bool,
    pub willing_to_work_as_extra: bool,
    pub about_yourself: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub email: String,
    pub phone: String,
}

impl TalentCard {
    pub fn from_principal(p: &Principal, connected: bool) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            role: p.role.clone(),
            gender: p.gender.clone(),
            age: p.age,
            height: p.height.clone(),
            weight: p.weight.clone(),
            body_type: p.body_type.clone(),
            skin_tone: p.skin_tone.clone(),
            language: p.language.clone(),
            skills: p.skills.clone(),
            profile_pic: p.image_url("profilePic"),
            front_image: p.image_url("front"),
            left_image: p.image_url("left"),
            right_image: p.image_url("right"),
            video: p.video_url(),
            makeover_needed: p.makeover_needed.unwrap_or(false),
            willing_to_work_as_extra: p.willing_to_work_as_extra.unwrap_or(false),
            about_yourself: p.about_yourself.clone(),
            created_at: p.created_at,
            updated_at: p.updated_at,
            email: if connected { p.email.clone() } else { String::new() },
            phone: if connected { p.phone.clone() } else { String::new() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::principal::Principal;

    fn talent() -> Principal {
        Principal {
            id: Uuid::new_v4(),
            kind: "Talent".into(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            phone: "555-0101".into(),
            gender: "Female".into(),
            role: "Model".into(),
            password_hash: "hash".into(),
            otp: None,
            is_verified: true,
            reset_token: None,
            reset_token_expires_at: None,
            device_token: None,
            age: Some(24),
            country: None,
            city: None,
            profile_pic_url: None,
            profile_pic_id: None,
            height: Some("170cm".into()),
            weight: Some("60kg".into()),
            body_type: Some("Slim".into()),
            skin_tone: Some("Fair".into()),
            language: Some("English".into()),
            skills: Some("Dance".into()),
            images: Some(serde_json::json!({
                "front": {"url": "/uploads/f.jpg", "id": "f"},
                "profilePic": {"url": "/uploads/p.jpg", "id": "p"}
            })),
            video: Some(serde_json::json!({"url": "/uploads/v.mp4", "id": "v"})),
            makeover_needed: Some(false),
            willing_to_work_as_extra: Some(true),
            about_yourself: Some("bio".into()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn contact_info_masked_when_not_connected() {
        let card = TalentCard::from_principal(&talent(), false);
        assert_eq!(card.email, "");
        assert_eq!(card.phone, "");
        assert_eq!(card.front_image.as_deref(), Some("/uploads/f.jpg"));
    }

    #[test]
    fn contact_info_present_when_connected() {
        let card = TalentCard::from_principal(&talent(), true);
        assert_eq!(card.email, "dana@example.com");
        assert_eq!(card.phone, "555-0101");
    }

    #[test]
    fn profile_view_strips_credentials() {
        let mut p = talent();
        p.otp = Some("123456".into());
        p.reset_token = Some("999999".into());
        let view = ProfileView::from(p);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("otp").is_none());
        assert!(json.get("reset_token").is_none());
        assert_eq!(json["name"], "Dana");
    }
}
