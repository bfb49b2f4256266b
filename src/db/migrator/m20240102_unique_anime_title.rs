use sea_orm_migration::prelude::*;

use super::m20240101_initial::Anime;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_anime_title_unique")
                    .table(Anime::Table)
                    .col(Anime::Title)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_anime_title_unique")
                    .table(Anime::Table)
                    .to_owned(),
            )
            .await
    }
}
