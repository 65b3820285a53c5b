use crate::entities::{activity_log, claims, items, messages, notifications, prelude::*};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

/// Fields required to store a new listing. Which ones the API demands
/// depends on the report type; by the time a `NewItem` is built they have
/// all been validated.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub user_id: Option<i32>,
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
}

/// Optional filters for listing queries; all present filters are ANDed.
#[derive(Debug, Clone, Default)]
pub struct ItemFilters {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub user_id: Option<i32>,
}

/// Per-user listing counts broken down by status.
#[derive(Debug, Clone, Copy)]
pub struct UserItemStats {
    pub total: u64,
    pub lost: u64,
    pub found: u64,
    pub recovered: u64,
}

pub struct ItemRepository {
    conn: DatabaseConnection,
}

impl ItemRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, item: NewItem) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = items::ActiveModel {
            user_id: Set(item.user_id),
            title: Set(item.title),
            description: Set(item.description),
            status: Set(item.status.clone()),
            category: Set(item.category),
            location: Set(item.location),
            date: Set(item.date),
            time: Set(item.time),
            posted_by: Set(item.posted_by),
            contact: Set(item.contact),
            reward: Set(item.reward),
            additional_info: Set(item.additional_info),
            image_path: Set(item.image_path),
            current_location: Set(item.current_location),
            views: Set(0),
            date_reported: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let res = Items::insert(active).exec(&self.conn).await?;
        info!("Stored {} item #{}", item.status, res.last_insert_id);
        Ok(res.last_insert_id)
    }

    /// Newest-first listing with all present filters ANDed together.
    /// `search` is a case-insensitive substring match against title or
    /// description (SQLite LIKE).
    pub async fn list(&self, filters: &ItemFilters) -> Result<Vec<items::Model>> {
        let mut query = Items::find().order_by_desc(items::Column::DateReported);

        if let Some(status) = &filters.status {
            query = query.filter(items::Column::Status.eq(status));
        }
        if let Some(category) = &filters.category {
            query = query.filter(items::Column::Category.eq(category));
        }
        if let Some(user_id) = filters.user_id {
            query = query.filter(items::Column::UserId.eq(user_id));
        }
        if let Some(search) = &filters.search {
            query = query.filter(
                Condition::any()
                    .add(items::Column::Title.contains(search))
                    .add(items::Column::Description.contains(search)),
            );
        }

        Ok(query.all(&self.conn).await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<items::Model>> {
        Ok(Items::find_by_id(id).one(&self.conn).await?)
    }

    /// Fetch an item for display, counting the view. The increment is a
    /// single SQL expression so concurrent reads cannot lose counts.
    pub async fn get_and_count_view(&self, id: i32) -> Result<Option<items::Model>> {
        let res = Items::update_many()
            .col_expr(
                items::Column::Views,
                Expr::col(items::Column::Views).add(1),
            )
            .filter(items::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if res.rows_affected == 0 {
            return Ok(None);
        }

        Ok(Items::find_by_id(id).one(&self.conn).await?)
    }

    /// Delete an item together with its claims and messages. Notification
    /// and audit references survive with the item reference nulled.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        if Items::find_by_id(id).one(&self.conn).await?.is_none() {
            return Ok(false);
        }

        Claims::delete_many()
            .filter(claims::Column::ItemId.eq(id))
            .exec(&self.conn)
            .await?;

        Messages::delete_many()
            .filter(messages::Column::ItemId.eq(id))
            .exec(&self.conn)
            .await?;

        Notifications::update_many()
            .col_expr(notifications::Column::ItemId, Expr::value(Option::<i32>::None))
            .filter(notifications::Column::ItemId.eq(id))
            .exec(&self.conn)
            .await?;

        ActivityLog::update_many()
            .col_expr(activity_log::Column::ItemId, Expr::value(Option::<i32>::None))
            .filter(activity_log::Column::ItemId.eq(id))
            .exec(&self.conn)
            .await?;

        let res = Items::delete_by_id(id).exec(&self.conn).await?;
        info!("Deleted item #{id}");
        Ok(res.rows_affected > 0)
    }

    /// Set status to `recovered` regardless of the current status.
    pub async fn mark_recovered(&self, id: i32) -> Result<bool> {
        let res = Items::update_many()
            .col_expr(items::Column::Status, Expr::value("recovered"))
            .col_expr(
                items::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(items::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected > 0)
    }

    pub async fn stats_for_user(&self, user_id: i32) -> Result<UserItemStats> {
        let count_with_status = |status: Option<&'static str>| {
            let mut query = Items::find().filter(items::Column::UserId.eq(user_id));
            if let Some(status) = status {
                query = query.filter(items::Column::Status.eq(status));
            }
            query.count(&self.conn)
        };

        Ok(UserItemStats {
            total: count_with_status(None).await?,
            lost: count_with_status(Some("lost")).await?,
            found: count_with_status(Some("found")).await?,
            recovered: count_with_status(Some("recovered")).await?,
        })
    }
}
