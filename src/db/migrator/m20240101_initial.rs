use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Anime::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Anime::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Anime::Title).string().not_null())
                    // Cover URLs and synopses have no practical length bound.
                    .col(ColumnDef::new(Anime::ImageUrl).text().null())
                    .col(ColumnDef::new(Anime::TotalEpisodes).integer().null())
                    .col(ColumnDef::new(Anime::EpisodesWatched).integer().null())
                    .col(ColumnDef::new(Anime::Status).string().null())
                    .col(ColumnDef::new(Anime::Genres).text().null())
                    .col(ColumnDef::new(Anime::Description).text().null())
                    .col(ColumnDef::new(Anime::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_anime_created_at")
                    .table(Anime::Table)
                    .col(Anime::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_anime_status")
                    .table(Anime::Table)
                    .col(Anime::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Anime::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Anime {
    Table,
    Id,
    Title,
    ImageUrl,
    TotalEpisodes,
    EpisodesWatched,
    Status,
    Genres,
    Description,
    CreatedAt,
}
