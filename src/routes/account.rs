//! Account flows shared by the hirer and talent route families. The
//! per-kind handlers in `hirer_routes` and `talent_routes` are thin
//! wrappers around these functions.

use axum::{http::StatusCode, Json};
use tokio::task::JoinHandle;

use crate::dto::account_dto::{
    AuthResponse, ForgotPasswordPayload, LoginPayload, ProfileView, RegisterPayload,
    RegisterResponse, ResetPasswordPayload, VerifyOtpPayload,
};
use crate::email::EmailError;
use crate::error::{Error, Result};
use crate::middleware::auth::AuthPrincipal;
use crate::models::principal::{is_valid_gender, is_valid_role, Principal, PrincipalKind};
use crate::utils::{otp, token};
use crate::AppState;
use validator::Validate;

/// Await a spawned email send; both a panicked task and a transport
/// failure become a 500 for the caller.
async fn await_delivery(handle: JoinHandle<std::result::Result<(), EmailError>>) -> Result<()> {
    handle
        .await
        .map_err(|e| Error::Internal(format!("Email task failed: {}", e)))?
        .map_err(|e| Error::Email(e.to_string()))
}

fn auth_response(state: &AppState, principal: Principal, message: Option<String>) -> Result<AuthResponse> {
    let token = token::issue_session_token(&state.config.jwt_secret, principal.id, &principal.role)?;
    Ok(AuthResponse {
        id: principal.id,
        name: principal.name,
        email: principal.email,
        phone: principal.phone,
        role: principal.role,
        token,
        message,
    })
}

pub async fn register(
    state: AppState,
    kind: PrincipalKind,
    payload: RegisterPayload,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;
    if !is_valid_gender(&payload.gender) {
        return Err(Error::BadRequest(format!(
            "Invalid gender: {}",
            payload.gender
        )));
    }
    if !is_valid_role(kind, &payload.role) {
        return Err(Error::BadRequest(format!(
            "Invalid role for {}: {}",
            kind, payload.role
        )));
    }

    let code = otp::generate_otp();
    let principal = state.principal_service.register(kind, &payload, &code).await?;
    await_delivery(state.mailer.send_otp(&principal.email, &code)).await?;

    let token =
        token::issue_session_token(&state.config.jwt_secret, principal.id, &principal.role)?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "OTP sent to your email".to_string(),
            user_id: principal.id,
            token,
        }),
    ))
}

pub async fn verify_otp(
    state: AppState,
    kind: PrincipalKind,
    auth: AuthPrincipal,
    payload: VerifyOtpPayload,
) -> Result<Json<AuthResponse>> {
    let principal = state
        .principal_service
        .verify_otp(kind, auth.id, &payload.otp)
        .await?;
    let response = auth_response(
        &state,
        principal,
        Some("OTP verified successfully".to_string()),
    )?;
    Ok(Json(response))
}

pub async fn resend_otp(
    state: AppState,
    kind: PrincipalKind,
    auth: AuthPrincipal,
) -> Result<Json<serde_json::Value>> {
    let code = otp::generate_otp();
    let principal = state
        .principal_service
        .refresh_otp(kind, auth.id, &code)
        .await?;
    await_delivery(state.mailer.send_otp(&principal.email, &code)).await?;
    Ok(Json(
        serde_json::json!({ "message": "OTP resent to your email" }),
    ))
}

pub async fn login(
    state: AppState,
    kind: PrincipalKind,
    payload: LoginPayload,
) -> Result<Json<AuthResponse>> {
    payload.validate()?;
    let principal = state
        .principal_service
        .login(
            kind,
            &payload.email,
            &payload.password,
            payload.device_token.as_deref(),
        )
        .await?;
    let response = auth_response(&state, principal, Some("Login successful".to_string()))?;
    Ok(Json(response))
}

pub async fn forgot_password(
    state: AppState,
    kind: PrincipalKind,
    payload: ForgotPasswordPayload,
) -> Result<Json<serde_json::Value>> {
    payload.validate()?;
    let code = otp::generate_otp();
    let principal = state
        .principal_service
        .set_reset_token(kind, &payload.email, &code)
        .await?;
    await_delivery(state.mailer.send_reset_code(&principal.email, &code)).await?;
    Ok(Json(
        serde_json::json!({ "message": "Reset code sent to your email" }),
    ))
}

pub async fn reset_password(
    state: AppState,
    kind: PrincipalKind,
    reset_token: String,
    payload: ResetPasswordPayload,
) -> Result<Json<serde_json::Value>> {
    payload.validate()?;
    state
        .principal_service
        .reset_password(kind, &reset_token, &payload.new_password)
        .await?;
    Ok(Json(
        serde_json::json!({ "message": "Password reset successfully" }),
    ))
}

pub async fn get_profile(
    state: AppState,
    kind: PrincipalKind,
    auth: AuthPrincipal,
) -> Result<Json<ProfileView>> {
    let principal = state
        .principal_service
        .find_by_id(auth.id)
        .await?
        .filter(|p| p.kind() == kind)
        .ok_or_else(|| Error::NotFound(format!("{} not found", kind)))?;
    Ok(Json(ProfileView::from(principal)))
}
