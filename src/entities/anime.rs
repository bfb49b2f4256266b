use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub total_episodes: Option<i32>,
    pub episodes_watched: Option<i32>,
    pub status: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub genres: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// RFC 3339 with fixed sub-second width so lexical order matches time order.
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
