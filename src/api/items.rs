use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::validation::validate_item_id;
use super::{
    ApiError, ApiResponse, AppState, ItemDetailPayload, ItemListPayload, MessagePayload,
    ReportPayload, client_ip,
};
use crate::db::{ItemFilters, NewItem};

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub user_id: Option<i32>,
}

/// GET /api/items
/// Newest-first listing; all present filters combine with AND.
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<ApiResponse<ItemListPayload>>, ApiError> {
    let filters = ItemFilters {
        status: query.status,
        category: query.category,
        search: query.search,
        user_id: query.user_id,
    };

    let items = state.store().list_items(&filters).await?;
    let items: Vec<_> = items.into_iter().map(Into::into).collect();
    let count = items.len();

    Ok(Json(ApiResponse::success(ItemListPayload { items, count })))
}

/// GET /api/items/{id}
/// Every successful read counts one view; two reads count two views.
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ItemDetailPayload>>, ApiError> {
    let id = validate_item_id(id)?;

    let item = state
        .store()
        .get_item_counting_view(id)
        .await?
        .ok_or_else(|| ApiError::item_not_found(id))?;

    Ok(Json(ApiResponse::success(ItemDetailPayload {
        item: item.into(),
    })))
}

/// DELETE /api/items/{id}
/// Claims and messages go with the item; notifications keep a nulled
/// reference.
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessagePayload>>, ApiError> {
    let id = validate_item_id(id)?;

    if !state.store().delete_item(id).await? {
        return Err(ApiError::item_not_found(id));
    }

    record_item_activity(&state, None, "item.deleted", &headers).await;

    Ok(Json(ApiResponse::success(MessagePayload::new(
        "Item deleted successfully",
    ))))
}

/// POST /api/items/{id}/recover
/// Sets status to `recovered` without inspecting the prior status.
pub async fn mark_recovered(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessagePayload>>, ApiError> {
    let id = validate_item_id(id)?;

    if !state.store().mark_item_recovered(id).await? {
        return Err(ApiError::item_not_found(id));
    }

    record_item_activity(&state, Some(id), "item.recovered", &headers).await;

    Ok(Json(ApiResponse::success(MessagePayload::new(
        "Item marked as recovered",
    ))))
}

/// POST /api/report-lost (multipart)
pub async fn report_lost(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ReportPayload>>, ApiError> {
    create_report(state, ReportKind::Lost, headers, multipart).await
}

/// POST /api/report-found (multipart)
pub async fn report_found(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ReportPayload>>, ApiError> {
    create_report(state, ReportKind::Found, headers, multipart).await
}

#[derive(Clone, Copy)]
enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    const fn status(self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }

    const fn date_field(self) -> &'static str {
        match self {
            Self::Lost => "dateLost",
            Self::Found => "dateFound",
        }
    }

    const fn time_field(self) -> &'static str {
        match self {
            Self::Lost => "timeLost",
            Self::Found => "timeFound",
        }
    }

    const fn success_message(self) -> &'static str {
        match self {
            Self::Lost => "Lost item reported successfully!",
            Self::Found => "Found item reported successfully!",
        }
    }
}

async fn create_report(
    state: Arc<AppState>,
    kind: ReportKind,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ReportPayload>>, ApiError> {
    let (fields, image) = collect_multipart(multipart).await?;

    let required = [
        "itemName",
        "category",
        "description",
        "location",
        kind.date_field(),
        "contactInfo",
    ];
    for field in required {
        if !fields.contains_key(field) {
            return Err(ApiError::validation(format!(
                "Missing required field: {field}"
            )));
        }
    }

    let image_path = match image {
        Some((filename, bytes)) if !bytes.is_empty() => Some(
            state
                .upload_service()
                .store(&filename, &bytes)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to store upload: {e}")))?,
        ),
        _ => None,
    };

    // Unknown or malformed user ids leave the listing unowned.
    let user_id = match fields.get("user_id").and_then(|v| v.parse::<i32>().ok()) {
        Some(id) => state.store().get_user_by_id(id).await?.map(|u| u.id),
        None => None,
    };

    let contact = fields["contactInfo"].clone();
    let posted_by = contact.split('@').next().unwrap_or_default().to_string();
    let title = fields["itemName"].clone();

    let reward = match kind {
        ReportKind::Lost => fields.get("reward").cloned(),
        ReportKind::Found => None,
    };
    let current_location = match kind {
        ReportKind::Lost => None,
        ReportKind::Found => fields.get("currentLocation").cloned(),
    };

    let item_id = state
        .store()
        .create_item(NewItem {
            user_id,
            title: title.clone(),
            description: fields["description"].clone(),
            status: kind.status().to_string(),
            category: fields["category"].clone(),
            location: fields["location"].clone(),
            date: fields[kind.date_field()].clone(),
            time: fields.get(kind.time_field()).cloned(),
            posted_by,
            contact,
            reward,
            additional_info: fields.get("additionalInfo").cloned(),
            image_path,
            current_location,
        })
        .await?;

    if let Err(e) = state
        .store()
        .record_activity(
            user_id,
            Some(item_id),
            "item.created",
            Some(format!("{} report: {title}", kind.status())),
            client_ip(&headers),
        )
        .await
    {
        tracing::warn!("Failed to record report activity: {e}");
    }

    Ok(Json(ApiResponse::success(ReportPayload {
        message: kind.success_message().to_string(),
        item_id,
    })))
}

/// Drain a multipart form into text fields plus the optional `itemImage`
/// file part.
async fn collect_multipart(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<(String, Vec<u8>)>), ApiError> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "itemImage" {
            let filename = field
                .file_name()
                .map_or_else(|| "upload".to_string(), ToString::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(format!("Failed to read upload: {e}")))?;
            image = Some((filename, bytes.to_vec()));
        } else if !name.is_empty() {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation(format!("Invalid field {name}: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, image))
}

async fn record_item_activity(
    state: &Arc<AppState>,
    item_id: Option<i32>,
    action: &str,
    headers: &HeaderMap,
) {
    if let Err(e) = state
        .store()
        .record_activity(None, item_id, action, None, client_ip(headers))
        .await
    {
        tracing::warn!("Failed to record {action} activity: {e}");
    }
}
