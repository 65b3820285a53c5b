use sea_orm::entity::prelude::*;

/// Core listing record. `status` is one of `lost`, `found`, `recovered`.
/// `date` and `time` are stored as strings to match the legacy data format.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning user; nulled when the user goes away, the item stays.
    pub user_id: Option<i32>,

    pub title: String,
    pub description: String,
    pub status: String,
    pub category: String,
    pub location: String,
    pub date: String,
    pub time: Option<String>,

    /// Display name derived from the contact address at report time.
    pub posted_by: String,
    pub contact: String,

    pub reward: Option<String>,
    pub additional_info: Option<String>,
    pub image_path: Option<String>,
    pub current_location: Option<String>,

    pub views: i32,

    pub date_reported: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,
    #[sea_orm(has_many = "super::claims::Entity")]
    Claims,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Claims.def()
    }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
