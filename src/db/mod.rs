use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{activity_log, categories, claims, items, messages, notifications};

pub mod migrator;
pub mod repositories;

pub use repositories::claim::NewClaim;
pub use repositories::item::{ItemFilters, NewItem, UserItemStats};
pub use repositories::message::NewMessage;
pub use repositories::user::{NewUser, ProfileUpdate, User};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("::memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn item_repo(&self) -> repositories::item::ItemRepository {
        repositories::item::ItemRepository::new(self.conn.clone())
    }

    fn claim_repo(&self) -> repositories::claim::ClaimRepository {
        repositories::claim::ClaimRepository::new(self.conn.clone())
    }

    fn message_repo(&self) -> repositories::message::MessageRepository {
        repositories::message::MessageRepository::new(self.conn.clone())
    }

    fn notification_repo(&self) -> repositories::notification::NotificationRepository {
        repositories::notification::NotificationRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn activity_repo(&self) -> repositories::activity::ActivityRepository {
        repositories::activity::ActivityRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn user_email_exists(&self, email: &str) -> Result<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn create_user(&self, new_user: NewUser, config: &SecurityConfig) -> Result<i32> {
        self.user_repo().create(new_user, config).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn update_user_profile(&self, id: i32, update: ProfileUpdate) -> Result<bool> {
        self.user_repo().update_profile(id, update).await
    }

    // ========== Items ==========

    pub async fn create_item(&self, item: NewItem) -> Result<i32> {
        self.item_repo().create(item).await
    }

    pub async fn list_items(&self, filters: &ItemFilters) -> Result<Vec<items::Model>> {
        self.item_repo().list(filters).await
    }

    pub async fn get_item(&self, id: i32) -> Result<Option<items::Model>> {
        self.item_repo().get(id).await
    }

    pub async fn get_item_counting_view(&self, id: i32) -> Result<Option<items::Model>> {
        self.item_repo().get_and_count_view(id).await
    }

    pub async fn delete_item(&self, id: i32) -> Result<bool> {
        self.item_repo().delete(id).await
    }

    pub async fn mark_item_recovered(&self, id: i32) -> Result<bool> {
        self.item_repo().mark_recovered(id).await
    }

    pub async fn user_item_stats(&self, user_id: i32) -> Result<UserItemStats> {
        self.item_repo().stats_for_user(user_id).await
    }

    // ========== Claims ==========

    pub async fn create_claim(&self, item_id: i32, claim: NewClaim) -> Result<i32> {
        self.claim_repo().create(item_id, claim).await
    }

    pub async fn get_claim(&self, id: i32) -> Result<Option<claims::Model>> {
        self.claim_repo().get(id).await
    }

    pub async fn claim_count_for_item(&self, item_id: i32) -> Result<u64> {
        self.claim_repo().count_for_item(item_id).await
    }

    // ========== Messages ==========

    pub async fn create_message(&self, message: NewMessage) -> Result<i32> {
        self.message_repo().create(message).await
    }

    pub async fn list_messages_for_receiver(&self, email: &str) -> Result<Vec<messages::Model>> {
        self.message_repo().list_for_receiver(email).await
    }

    // ========== Notifications ==========

    pub async fn create_notification(
        &self,
        user_id: i32,
        item_id: Option<i32>,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<i32> {
        self.notification_repo()
            .create(user_id, item_id, kind, title, message)
            .await
    }

    pub async fn list_notifications_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<notifications::Model>> {
        self.notification_repo().list_for_user(user_id).await
    }

    pub async fn mark_notification_read(&self, id: i32) -> Result<bool> {
        self.notification_repo().mark_read(id).await
    }

    pub async fn unread_notification_count(&self, user_id: i32) -> Result<u64> {
        self.notification_repo().unread_count(user_id).await
    }

    // ========== Categories ==========

    pub async fn list_categories(&self) -> Result<Vec<categories::Model>> {
        self.category_repo().list().await
    }

    // ========== Activity log ==========

    pub async fn record_activity(
        &self,
        user_id: Option<i32>,
        item_id: Option<i32>,
        action: &str,
        details: Option<String>,
        ip_address: Option<String>,
    ) -> Result<()> {
        self.activity_repo()
            .record(user_id, item_id, action, details, ip_address)
            .await
    }

    pub async fn recent_activity(&self, limit: u64) -> Result<Vec<activity_log::Model>> {
        use sea_orm::{EntityTrait, QueryOrder, QuerySelect};

        Ok(crate::entities::prelude::ActivityLog::find()
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }
}
