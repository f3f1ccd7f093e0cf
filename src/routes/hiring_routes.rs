use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::json;

use crate::dto::hiring_dto::{
    HirerRequestView, SendRequestPayload, TalentRequestView, UpdateStatusPayload,
};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthPrincipal;
use crate::models::hiring_request::{HiringRequest, RequestStatus};
use crate::models::principal::PrincipalKind;
use crate::AppState;

pub async fn send_request(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Json(payload): Json<SendRequestPayload>,
) -> Result<(StatusCode, Json<HiringRequest>)> {
    if auth.kind != PrincipalKind::Hirer {
        return Err(Error::Forbidden(
            "Only hirers can send hiring requests".to_string(),
        ));
    }
    let request = state
        .hiring_service
        .send_request(auth.id, payload.talent_id, payload.message)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn talent_requests(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<Vec<TalentRequestView>>> {
    if auth.kind != PrincipalKind::Talent {
        return Err(Error::Forbidden(
            "Only talents can view their incoming requests".to_string(),
        ));
    }
    let rows = state.hiring_service.requests_for_talent(auth.id).await?;
    Ok(Json(rows.into_iter().map(TalentRequestView::from).collect()))
}

pub async fn hirer_requests(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<Vec<HirerRequestView>>> {
    if auth.kind != PrincipalKind::Hirer {
        return Err(Error::Forbidden(
            "Only hirers can view their sent requests".to_string(),
        ));
    }
    let rows = state.hiring_service.requests_for_hirer(auth.id).await?;
    if rows.is_empty() {
        return Err(Error::NotFound("No requests found".to_string()));
    }
    Ok(Json(rows.into_iter().map(HirerRequestView::from).collect()))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<serde_json::Value>> {
    let status: RequestStatus = payload
        .status
        .parse()
        .map_err(|_| Error::BadRequest("Invalid status".to_string()))?;
    if !status.is_transition_target() {
        return Err(Error::BadRequest("Invalid status".to_string()));
    }

    let outcome = state
        .hiring_service
        .update_status(auth.id, payload.request_id, status)
        .await?;

    match outcome {
        Some(request) => Ok(Json(json!({
            "message": "Request accepted",
            "request": request,
        }))),
        None => Ok(Json(json!({ "message": "Request rejected and removed" }))),
    }
}
