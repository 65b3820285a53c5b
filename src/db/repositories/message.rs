use crate::entities::{messages, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub item_id: i32,
    pub sender_name: String,
    pub sender_email: String,
    pub receiver_email: String,
    pub subject: Option<String>,
    pub message: String,
}

pub struct MessageRepository {
    conn: DatabaseConnection,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, message: NewMessage) -> Result<i32> {
        let active = messages::ActiveModel {
            item_id: Set(message.item_id),
            sender_name: Set(message.sender_name),
            sender_email: Set(message.sender_email),
            receiver_email: Set(message.receiver_email),
            subject: Set(message.subject),
            message: Set(message.message),
            read: Set(false),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = Messages::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn list_for_receiver(&self, email: &str) -> Result<Vec<messages::Model>> {
        let rows = Messages::find()
            .filter(messages::Column::ReceiverEmail.eq(email))
            .order_by_desc(messages::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
