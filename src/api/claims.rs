use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_item_id;
use super::{ApiError, ApiResponse, AppState, ClaimPayload, client_ip};
use crate::db::NewClaim;

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub verification: Option<String>,
}

/// POST /api/items/{id}/claim
/// File a claim against an item. When the item is owned, the owner gets
/// exactly one `claim` notification; unowned items get none. Repeated
/// claims are stored independently.
pub async fn submit_claim(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(item_id): Path<i32>,
    Json(payload): Json<ClaimRequest>,
) -> Result<Json<ApiResponse<ClaimPayload>>, ApiError> {
    let item_id = validate_item_id(item_id)?;

    let item = state
        .store()
        .get_item(item_id)
        .await?
        .ok_or_else(|| ApiError::item_not_found(item_id))?;

    let claimant_name = payload
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Anonymous".to_string());

    let claim_id = state
        .store()
        .create_claim(
            item_id,
            NewClaim {
                claimant_name: claimant_name.clone(),
                claimant_email: payload.email.unwrap_or_default(),
                claimant_phone: payload.phone,
                description: payload.description.unwrap_or_default(),
                verification_details: payload.verification,
            },
        )
        .await?;

    if let Some(owner_id) = item.user_id {
        state
            .store()
            .create_notification(
                owner_id,
                Some(item_id),
                "claim",
                "New Claim Received",
                &format!("{claimant_name} has claimed your item: {}", item.title),
            )
            .await?;
    }

    if let Err(e) = state
        .store()
        .record_activity(
            item.user_id,
            Some(item_id),
            "claim.submitted",
            Some(serde_json::json!({ "claimant": claimant_name }).to_string()),
            client_ip(&headers),
        )
        .await
    {
        tracing::warn!("Failed to record claim activity: {e}");
    }

    Ok(Json(ApiResponse::success(ClaimPayload {
        message: "Claim submitted successfully!".to_string(),
        claim_id,
    })))
}
