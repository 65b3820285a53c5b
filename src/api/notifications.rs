use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessagePayload, NotificationListPayload};

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub user_id: Option<i32>,
}

/// GET /api/notifications?user_id=
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ApiResponse<NotificationListPayload>>, ApiError> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::validation("user_id is required"))?;

    let notifications = state
        .store()
        .list_notifications_for_user(user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::success(NotificationListPayload {
        notifications,
    })))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessagePayload>>, ApiError> {
    if !state.store().mark_notification_read(id).await? {
        return Err(ApiError::not_found("Notification", id));
    }

    Ok(Json(ApiResponse::success(MessagePayload::new(
        "Notification marked as read",
    ))))
}
