use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_item_id;
use super::{ApiError, ApiResponse, AppState, MessageListPayload, SendMessagePayload};
use crate::db::NewMessage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub email: Option<String>,
}

/// POST /api/items/{id}/message
/// Send a message about an item; it is addressed to the contact recorded
/// on the listing.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i32>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<SendMessagePayload>>, ApiError> {
    let item_id = validate_item_id(item_id)?;

    let sender_email = payload
        .sender_email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::validation("senderEmail is required"))?;
    let body = payload
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::validation("message is required"))?;

    let item = state
        .store()
        .get_item(item_id)
        .await?
        .ok_or_else(|| ApiError::item_not_found(item_id))?;

    let message_id = state
        .store()
        .create_message(NewMessage {
            item_id,
            sender_name: payload.sender_name.unwrap_or_else(|| "Anonymous".to_string()),
            sender_email,
            receiver_email: item.contact,
            subject: payload.subject,
            message: body,
        })
        .await?;

    Ok(Json(ApiResponse::success(SendMessagePayload {
        message: "Message sent".to_string(),
        message_id,
    })))
}

/// GET /api/messages?email=
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<ApiResponse<MessageListPayload>>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::validation("email is required"))?;

    let messages = state
        .store()
        .list_messages_for_receiver(&email)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::success(MessageListPayload { messages })))
}
