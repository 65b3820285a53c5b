use crate::entities::{claims, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::info;

/// Claimant details as submitted; the claim itself always starts `pending`.
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub claimant_name: String,
    pub claimant_email: String,
    pub claimant_phone: Option<String>,
    pub description: String,
    pub verification_details: Option<String>,
}

pub struct ClaimRepository {
    conn: DatabaseConnection,
}

impl ClaimRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Repeated claims from the same claimant are stored independently;
    /// there is no deduplication.
    pub async fn create(&self, item_id: i32, claim: NewClaim) -> Result<i32> {
        let active = claims::ActiveModel {
            item_id: Set(item_id),
            claimant_name: Set(claim.claimant_name),
            claimant_email: Set(claim.claimant_email),
            claimant_phone: Set(claim.claimant_phone),
            description: Set(claim.description),
            verification_details: Set(claim.verification_details),
            status: Set("pending".to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = Claims::insert(active).exec(&self.conn).await?;
        info!("Claim #{} filed against item {}", res.last_insert_id, item_id);
        Ok(res.last_insert_id)
    }

    pub async fn get(&self, id: i32) -> Result<Option<claims::Model>> {
        Ok(Claims::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn count_for_item(&self, item_id: i32) -> Result<u64> {
        Ok(Claims::find()
            .filter(claims::Column::ItemId.eq(item_id))
            .count(&self.conn)
            .await?)
    }
}
