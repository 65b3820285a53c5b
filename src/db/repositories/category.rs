use crate::entities::{categories, prelude::*};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<categories::Model>> {
        Ok(Categories::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await?)
    }
}
