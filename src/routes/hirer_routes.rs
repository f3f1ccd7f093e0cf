use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::account_dto::{
    AuthResponse, ForgotPasswordPayload, LoginPayload, ProfileView, RegisterPayload,
    RegisterResponse, ResetPasswordPayload, VerifyOtpPayload,
};
use crate::dto::submission_dto::{CreateSubmissionPayload, SubmissionView, UpdateSubmissionPayload};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthPrincipal;
use crate::models::principal::PrincipalKind;
use crate::models::submission::Submission;
use crate::routes::account;
use crate::services::principal_service::HirerProfileUpdate;
use crate::AppState;

const KIND: PrincipalKind = PrincipalKind::Hirer;

pub async fn register_hirer(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    account::register(state, KIND, payload).await
}

pub async fn verify_hirer_otp(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Json(payload): Json<VerifyOtpPayload>,
) -> Result<Json<AuthResponse>> {
    account::verify_otp(state, KIND, auth, payload).await
}

pub async fn resend_hirer_otp(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<serde_json::Value>> {
    account::resend_otp(state, KIND, auth).await
}

pub async fn login_hirer(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>> {
    account::login(state, KIND, payload).await
}

pub async fn forgot_hirer_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    account::forgot_password(state, KIND, payload).await
}

pub async fn reset_hirer_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<serde_json::Value>> {
    account::reset_password(state, KIND, token, payload).await
}

pub async fn get_hirer_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<ProfileView>> {
    account::get_profile(state, KIND, auth).await
}

/// Partial multipart update. Text parts fill profile columns; a
/// `profilePic` file part replaces the stored picture, deleting the old
/// file first.
pub async fn update_hirer_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    mut multipart: Multipart,
) -> Result<Json<ProfileView>> {
    let current = state
        .principal_service
        .find_by_id(auth.id)
        .await?
        .filter(|p| p.kind() == KIND)
        .ok_or_else(|| Error::NotFound("Hirer not found".to_string()))?;

    let mut update = HirerProfileUpdate::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        match name.as_str() {
            "profilePic" | "profile_pic" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let data = field.bytes().await?;
                if let Some(old) = current.profile_pic_id.as_deref() {
                    state.media.delete(old).await?;
                }
                let folder = format!("hirer_profiles/{}", auth.id);
                let stored = state.media.store_image(&folder, &filename, &data).await?;
                update.profile_pic = Some(stored);
            }
            other => {
                let value = field.text().await?;
                if value.is_empty() {
                    continue;
                }
                match other {
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
                    "country" => update.country = Some(value),
                    "city" => update.city = Some(value),
                    "device_token" => update.device_token = Some(value),
                    _ => {}
                }
            }
        }
    }

    if update.is_empty() {
        return Err(Error::BadRequest(
            "No fields provided for update".to_string(),
        ));
    }

    let updated = state
        .principal_service
        .update_hirer_profile(auth.id, update)
        .await?;
    Ok(Json(ProfileView::from(updated)))
}

pub async fn create_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Json(payload): Json<CreateSubmissionPayload>,
) -> Result<(StatusCode, Json<Submission>)> {
    payload.validate()?;
    let submission = state
        .submission_service
        .create(auth.id, &payload.subject, &payload.description)
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthPrincipal>,
) -> Result<Json<Vec<SubmissionView>>> {
    let rows = state.submission_service.list_all().await?;
    Ok(Json(rows.into_iter().map(SubmissionView::from).collect()))
}

pub async fn update_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubmissionPayload>,
) -> Result<Json<Submission>> {
    if payload.is_empty() {
        return Err(Error::BadRequest(
            "At least one field is required".to_string(),
        ));
    }
    let updated = state
        .submission_service
        .update(
            id,
            auth.id,
            auth.role == "admin",
            payload.subject.as_deref().filter(|s| !s.is_empty()),
            payload.description.as_deref().filter(|s| !s.is_empty()),
        )
        .await?;
    Ok(Json(updated))
}

pub async fn delete_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state
        .submission_service
        .delete(id, auth.id, auth.role == "admin")
        .await?;
    Ok(Json(json!({ "message": "Submission deleted successfully" })))
}

pub async fn list_hirer_submissions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Path(hirer_id): Path<Uuid>,
) -> Result<Json<Vec<SubmissionView>>> {
    if auth.id != hirer_id && auth.role != "admin" {
        return Err(Error::Forbidden(
            "Not authorized to view these submissions".to_string(),
        ));
    }
    let rows = state.submission_service.list_by_owner(hirer_id).await?;
    Ok(Json(rows.into_iter().map(SubmissionView::from).collect()))
}
