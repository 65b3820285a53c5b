use crate::entities::{activity_log, prelude::*};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

/// Append-only audit trail writer.
pub struct ActivityRepository {
    conn: DatabaseConnection,
}

impl ActivityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn record(
        &self,
        user_id: Option<i32>,
        item_id: Option<i32>,
        action: &str,
        details: Option<String>,
        ip_address: Option<String>,
    ) -> Result<()> {
        let active = activity_log::ActiveModel {
            user_id: Set(user_id),
            item_id: Set(item_id),
            action: Set(action.to_string()),
            details: Set(details),
            ip_address: Set(ip_address),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        ActivityLog::insert(active).exec(&self.conn).await?;
        Ok(())
    }
}
