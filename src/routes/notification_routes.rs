use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::dto::notification_dto::{CreateNotificationPayload, NotificationView};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthPrincipal;
use crate::AppState;

pub async fn send_to_all(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthPrincipal>,
    Json(payload): Json<CreateNotificationPayload>,
) -> Result<(StatusCode, Json<NotificationView>)> {
    if !payload.has_content() {
        return Err(Error::BadRequest(
            "At least one of title, status or body is required".to_string(),
        ));
    }
    let notification = state
        .notification_service
        .send_to_all(
            payload.title.as_deref(),
            payload.status.as_deref(),
            payload.body.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(NotificationView::from(notification))))
}

pub async fn send_to_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
    Json(payload): Json<CreateNotificationPayload>,
) -> Result<(StatusCode, Json<NotificationView>)> {
    if !payload.has_content() {
        return Err(Error::BadRequest(
            "At least one of title, status or body is required".to_string(),
        ));
    }
    let target = payload.user_id.unwrap_or(auth.id);
    let notification = state
        .notification_service
        .send_to_user(
            target,
            payload.title.as_deref(),
            payload.status.as_deref(),
            payload.body.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(NotificationView::from(notification))))
}

pub async fn global_feed(
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationView>>> {
    let notifications = state.notification_service.global_feed().await?;
    Ok(Json(
        notifications.into_iter().map(NotificationView::from).collect(),
    ))
}

pub async fn user_feed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthPrincipal>,
) -> Result<Json<Vec<NotificationView>>> {
    let notifications = state
        .notification_service
        .user_feed(auth.id, auth.kind)
        .await?;
    Ok(Json(
        notifications.into_iter().map(NotificationView::from).collect(),
    ))
}
