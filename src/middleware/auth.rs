use crate::models::principal::PrincipalKind;
use crate::utils::token::decode_session_token;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use uuid::Uuid;

/// Identity attached to every authenticated request. `kind` comes from
/// the principals row, not from the token, so a stale or forged role
/// claim cannot change what the caller is allowed to do.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub id: Uuid,
    pub kind: PrincipalKind,
    pub role: String,
    pub email: String,
}

pub async fn require_principal(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response();
    };

    let claims = match decode_session_token(&state.config.jwt_secret, token) {
        Ok(claims) => claims,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error":"invalid_token"})),
            )
                .into_response();
        }
    };

    let Ok(subject) = Uuid::parse_str(&claims.sub) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_token"})),
        )
            .into_response();
    };

    // One lookup against the single principals table resolves both the
    // identity and its kind.
    match state.principal_service.find_by_id(subject).await {
        Ok(Some(principal)) => {
            let auth = AuthPrincipal {
                id: principal.id,
                kind: principal.kind(),
                role: principal.role.clone(),
                email: principal.email.clone(),
            };
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unknown_subject"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "principal lookup failed during auth");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error":"auth_lookup_failed"})),
            )
                .into_response()
        }
    }
}
