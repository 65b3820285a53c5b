use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_user_id;
use super::{ApiError, ApiResponse, AppState, MessagePayload, StatsPayload, UpdateProfileRequest};
use crate::db::ProfileUpdate;

/// GET /api/users/{id}/stats
/// Listing counts for the user's items, broken down by status.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<StatsPayload>>, ApiError> {
    let user_id = validate_user_id(user_id)?;

    if state.store().get_user_by_id(user_id).await?.is_none() {
        return Err(ApiError::user_not_found(user_id));
    }

    let stats = state.store().user_item_stats(user_id).await?;

    Ok(Json(ApiResponse::success(StatsPayload {
        stats: stats.into(),
    })))
}

/// PUT /api/users/{id}
/// Partial profile update: absent fields keep their stored value, and the
/// nested notification/privacy preference objects follow the same rule
/// field by field.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<MessagePayload>>, ApiError> {
    let user_id = validate_user_id(user_id)?;

    let notifications = payload.notifications;
    let privacy = payload.privacy;

    let update = ProfileUpdate {
        name: payload.name,
        phone: payload.phone,
        location: payload.location,
        bio: payload.bio,
        email_notifications: notifications.as_ref().and_then(|n| n.email),
        sms_notifications: notifications.as_ref().and_then(|n| n.sms),
        profile_visibility: privacy.as_ref().and_then(|p| p.visibility.clone()),
        show_phone: privacy.as_ref().and_then(|p| p.show_phone),
    };

    if !state.store().update_user_profile(user_id, update).await? {
        return Err(ApiError::user_not_found(user_id));
    }

    Ok(Json(ApiResponse::success(MessagePayload::new(
        "Profile updated successfully",
    ))))
}
