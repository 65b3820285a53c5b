use crate::entities::{notifications, prelude::*};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

pub struct NotificationRepository {
    conn: DatabaseConnection,
}

impl NotificationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        user_id: i32,
        item_id: Option<i32>,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<i32> {
        let active = notifications::ActiveModel {
            user_id: Set(user_id),
            item_id: Set(item_id),
            kind: Set(kind.to_string()),
            title: Set(title.to_string()),
            message: Set(message.to_string()),
            read: Set(false),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = Notifications::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<notifications::Model>> {
        let rows = Notifications::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn mark_read(&self, id: i32) -> Result<bool> {
        let res = Notifications::update_many()
            .col_expr(notifications::Column::Read, Expr::value(true))
            .filter(notifications::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected > 0)
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64> {
        Ok(Notifications::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::Read.eq(false))
            .count(&self.conn)
            .await?)
    }
}
