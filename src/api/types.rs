use serde::{Deserialize, Serialize};

use crate::db::User;
use crate::db::UserItemStats;
use crate::entities::{categories, items, messages, notifications};

/// Response envelope: `success` plus the endpoint's payload keys flattened
/// beside it, or `error` on failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MessagePayload {
    pub message: String,
}

impl MessagePayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterPayload {
    pub message: String,
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
pub struct LoginPayload {
    pub user: UserSummaryDto,
}

#[derive(Debug, Serialize)]
pub struct ItemListPayload {
    pub items: Vec<ItemSummaryDto>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ItemDetailPayload {
    pub item: ItemDetailDto,
}

#[derive(Debug, Serialize)]
pub struct ReportPayload {
    pub message: String,
    pub item_id: i32,
}

#[derive(Debug, Serialize)]
pub struct ClaimPayload {
    pub message: String,
    pub claim_id: i32,
}

#[derive(Debug, Serialize)]
pub struct StatsPayload {
    pub stats: UserStatsDto,
}

#[derive(Debug, Serialize)]
pub struct NotificationListPayload {
    pub notifications: Vec<NotificationDto>,
}

#[derive(Debug, Serialize)]
pub struct SendMessagePayload {
    pub message: String,
    pub message_id: i32,
}

#[derive(Debug, Serialize)]
pub struct MessageListPayload {
    pub messages: Vec<MessageDto>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListPayload {
    pub categories: Vec<CategoryDto>,
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UserSummaryDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub join_date: String,
}

impl From<User> for UserSummaryDto {
    fn from(user: User) -> Self {
        let name = user.display_name();
        Self {
            id: user.id,
            name,
            email: user.email,
            phone: user.phone,
            location: user.location,
            join_date: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemSummaryDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub category: String,
    pub location: String,
    pub date: String,
    pub time: Option<String>,
    pub posted_by: String,
    pub contact: String,
    pub reward: Option<String>,
    pub image_path: Option<String>,
    /// Emoji stand-in shown when the listing has no photo.
    pub image: &'static str,
    pub views: i32,
    pub date_reported: String,
}

impl From<items::Model> for ItemSummaryDto {
    fn from(item: items::Model) -> Self {
        let image = category_emoji(&item.category);
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            status: item.status,
            category: item.category,
            location: item.location,
            date: item.date,
            time: item.time,
            posted_by: item.posted_by,
            contact: item.contact,
            reward: item.reward,
            image_path: item.image_path,
            image,
            views: item.views,
            date_reported: item.date_reported,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemDetailDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub category: String,
    pub location: String,
    pub date: String,
    pub time: Option<String>,
    pub posted_by: String,
    pub contact: String,
    pub reward: Option<String>,
    pub additional_info: Option<String>,
    pub image_path: Option<String>,
    pub current_location: Option<String>,
    pub image: &'static str,
    pub views: i32,
    pub user_id: Option<i32>,
}

impl From<items::Model> for ItemDetailDto {
    fn from(item: items::Model) -> Self {
        let image = category_emoji(&item.category);
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            status: item.status,
            category: item.category,
            location: item.location,
            date: item.date,
            time: item.time,
            posted_by: item.posted_by,
            contact: item.contact,
            reward: item.reward,
            additional_info: item.additional_info,
            image_path: item.image_path,
            current_location: item.current_location,
            image,
            views: item.views,
            user_id: item.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserStatsDto {
    pub total: u64,
    pub lost: u64,
    pub found: u64,
    pub recovered: u64,
}

impl From<UserItemStats> for UserStatsDto {
    fn from(stats: UserItemStats) -> Self {
        Self {
            total: stats.total,
            lost: stats.lost,
            found: stats.found,
            recovered: stats.recovered,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationDto {
    pub id: i32,
    pub user_id: i32,
    pub item_id: Option<i32>,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<notifications::Model> for NotificationDto {
    fn from(n: notifications::Model) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            item_id: n.item_id,
            kind: n.kind,
            title: n.title,
            message: n.message,
            read: n.read,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub id: i32,
    pub item_id: i32,
    pub sender_name: String,
    pub sender_email: String,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<messages::Model> for MessageDto {
    fn from(m: messages::Model) -> Self {
        Self {
            id: m.id,
            item_id: m.item_id,
            sender_name: m.sender_name,
            sender_email: m.sender_email,
            subject: m.subject,
            message: m.message,
            read: m.read,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub item_count: i32,
}

impl From<categories::Model> for CategoryDto {
    fn from(c: categories::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            emoji: c.emoji,
            description: c.description,
            item_count: c.item_count,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Profile update; every field is optional and absent fields keep the
/// stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub notifications: Option<NotificationPrefs>,
    #[serde(default)]
    pub privacy: Option<PrivacyPrefs>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationPrefs {
    pub email: Option<bool>,
    pub sms: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PrivacyPrefs {
    pub visibility: Option<String>,
    #[serde(rename = "showPhone")]
    pub show_phone: Option<bool>,
}

/// Emoji stand-in used when a listing has no uploaded photo.
#[must_use]
pub fn category_emoji(category: &str) -> &'static str {
    match category {
        "electronics" => "\u{1F4F1}",
        "accessories" => "\u{1F453}",
        "bags" => "\u{1F392}",
        "documents" => "\u{1F194}",
        "jewelry" => "\u{1F48D}",
        "clothing" => "\u{1F455}",
        _ => "\u{1F4E6}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_flattens_payload_keys() {
        let body = ApiResponse::success(ReportPayload {
            message: "ok".to_string(),
            item_id: 7,
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["item_id"], 7);
        assert!(json.get("data").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn envelope_error_shape() {
        let body = ApiResponse::<()>::error("boom");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn unknown_category_falls_back_to_box() {
        assert_eq!(category_emoji("vehicles"), "\u{1F4E6}");
        assert_eq!(category_emoji("electronics"), "\u{1F4F1}");
    }
}
