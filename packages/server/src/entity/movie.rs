use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
    /// Cast members stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub casts: serde_json::Value,
    /// Genres stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: serde_json::Value,

    /// NULL only for rows predating ownership.
    pub added_by: Option<i32>,
    #[sea_orm(belongs_to, from = "added_by", to = "id")]
    pub owner: BelongsTo<Option<super::user::Entity>>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
