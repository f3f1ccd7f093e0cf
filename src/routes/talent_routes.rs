use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use std::collections::HashSet;

use crate::dto::account_dto::{
    AuthResponse, ForgotPasswordPayload, LoginPayload, ProfileView, RegisterPayload,
    RegisterResponse, ResetPasswordPayload, TalentCard, VerifyOtpPayload,
};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthPrincipal;
use crate::models::principal::PrincipalKind;
use crate::routes::account;
use crate::services::principal_service::TalentProfileUpdate;
use crate::AppState;

const KIND: PrincipalKind = PrincipalKind::Talent;

/// Image slots accepted by the profile update, matching the keys of the
/// `images` JSONB value.
const IMAGE_SLOTS: &[&str] = &["front", "left", "right", "profilePic"];

pub async fn register_talent(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    account::register(state, KIND, payload).await
}

pub async fn verify_talent_otp(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Json(payload): Json<VerifyOtpPayload>,
) -> Result<Json<AuthResponse>> {
    account::verify_otp(state, KIND, auth, payload).await
}

pub async fn resend_talent_otp(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<serde_json::Value>> {
    account::resend_otp(state, KIND, auth).await
}

pub async fn login_talent(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>> {
    account::login(state, KIND, payload).await
}

pub async fn forgot_talent_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    account::forgot_password(state, KIND, payload).await
}

pub async fn reset_talent_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    account::reset_password(state, KIND, token, payload).await
}

pub async fn get_talent_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<ProfileView>> {
    account::get_profile(state, KIND, auth).await
}

/// Partial multipart update. Image parts land in their slot of the
/// `images` JSONB value, a `video` part replaces the stored video; old
/// files are deleted before the replacement is stored.
pub async fn update_talent_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    mut multipart: Multipart,
) -> Result<Json<ProfileView>> {
    let current = state
        .principal_service
        .find_by_id(auth.id)
        .await?
        .filter(|p| p.kind() == KIND)
        .ok_or_else(|| Error::NotFound("Talent not found".to_string()))?;

    let mut update = TalentProfileUpdate::default();
    let mut images = match current.images.clone() {
        Some(value @ serde_json::Value::Object(_)) => value,
        _ => json!({}),
    };
    let mut images_changed = false;
    let folder = format!("talent_profiles/{}", auth.id);

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        let slot = if name == "profile_pic" {
            "profilePic"
        } else {
            name.as_str()
        };

        if IMAGE_SLOTS.contains(&slot) {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let data = field.bytes().await?;
            if let Some(old) = current.image_id(slot) {
                state.media.delete(&old).await?;
            }
            let stored = state.media.store_image(&folder, &filename, &data).await?;
            images[slot] = json!({ "url": stored.url, "id": stored.id });
            images_changed = true;
            continue;
        }

        if name == "video" {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let data = field.bytes().await?;
            if let Some(old) = current.video_id() {
                state.media.delete(&old).await?;
            }
            let stored = state.media.store_video(&folder, &filename, &data).await?;
            update.video = Some(json!({ "url": stored.url, "id": stored.id }));
            continue;
        }

        let value = field.text().await?;
        if value.is_empty() {
            continue;
        }
        match name.as_str() {
            "name" => update.name = Some(value),
            "email" => update.email = Some(value),
            "phone" => update.phone = Some(value),
            "age" => {
                update.age = Some(
                    value
                        .parse()
                        .map_err(|_| Error::BadRequest("Invalid age".to_string()))?,
                )
            }
            "height" => update.height = Some(value),
            "weight" => update.weight = Some(value),
            "body_type" => update.body_type = Some(value),
            "skin_tone" => update.skin_tone = Some(value),
            "language" => update.language = Some(value),
            "skills" => update.skills = Some(value),
            "makeover_needed" => {
                update.makeover_needed = Some(value.parse().map_err(|_| {
                    Error::BadRequest("Invalid value for makeover_needed".to_string())
                })?)
            }
            "willing_to_work_as_extra" => {
                update.willing_to_work_as_extra = Some(value.parse().map_err(|_| {
                    Error::BadRequest("Invalid value for willing_to_work_as_extra".to_string())
                })?)
            }
            "about_yourself" => update.about_yourself = Some(value),
            "device_token" => update.device_token = Some(value),
            _ => {}
        }
    }

    if images_changed {
        update.images = Some(images);
    }
    if update.is_empty() {
        return Err(Error::BadRequest(
            "No fields provided for update".to_string(),
        ));
    }

    let updated = state
        .principal_service
        .update_talent_profile(auth.id, update)
        .await?;
    Ok(Json(ProfileView::from(updated)))
}

/// Browse listing for hirers: only talents with complete profiles, and
/// contact info only for talents connected by an Accepted request.
pub async fn all_talents(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<Vec<TalentCard>>> {
    if auth.kind != PrincipalKind::Hirer {
        return Err(Error::Forbidden(
            "Only hirers can view all talents".to_string(),
        ));
    }

    let talents = state.principal_service.all_complete_talents().await?;
    if talents.is_empty() {
        return Err(Error::NotFound("No talents found".to_string()));
    }

    let connected: HashSet<_> = state
        .principal_service
        .connected_talent_ids(auth.id)
        .await?
        .into_iter()
        .collect();

    let cards = talents
        .iter()
        .map(|t| TalentCard::from_principal(t, connected.contains(&t.id)))
        .collect();
    Ok(Json(cards))
}
