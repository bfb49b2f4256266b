use crate::entities::{anime, prelude::*};
use crate::models::anime::{AnimeInput, AnimeRecord};
use chrono::{SecondsFormat, Utc};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info};

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Builds an active model that overwrites every user-editable column.
    fn editable_columns(input: &AnimeInput) -> anime::ActiveModel {
        anime::ActiveModel {
            id: NotSet,
            title: Set(input.title.clone()),
            image_url: Set(input.image_url.clone()),
            total_episodes: Set(input.total_episodes),
            episodes_watched: Set(input.episodes_watched),
            status: Set(input.status.map(|s| s.as_str().to_string())),
            genres: Set(input.genres.clone()),
            description: Set(input.description.clone()),
            created_at: NotSet,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<AnimeRecord>, DbErr> {
        let rows = Anime::find()
            .order_by_desc(anime::Column::CreatedAt)
            .order_by_desc(anime::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(AnimeRecord::from).collect())
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<AnimeRecord>, DbErr> {
        let rows = Anime::find()
            .filter(anime::Column::Status.eq(status))
            .order_by_desc(anime::Column::CreatedAt)
            .order_by_desc(anime::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(AnimeRecord::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<AnimeRecord>, DbErr> {
        let row = Anime::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(AnimeRecord::from))
    }

    pub async fn insert(&self, input: &AnimeInput) -> Result<i32, DbErr> {
        let mut active_model = Self::editable_columns(input);
        active_model.created_at = Set(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));

        let result = Anime::insert(active_model).exec(&self.conn).await?;

        info!("Added anime {}: {}", result.last_insert_id, input.title);
        Ok(result.last_insert_id)
    }

    pub async fn update(&self, id: i32, input: &AnimeInput) -> Result<bool, DbErr> {
        let result = Anime::update_many()
            .set(Self::editable_columns(input))
            .filter(anime::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        let updated = result.rows_affected > 0;
        if updated {
            info!("Updated anime with ID: {}", id);
        }
        Ok(updated)
    }

    pub async fn remove(&self, id: i32) -> Result<bool, DbErr> {
        let result = Anime::delete_by_id(id).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed anime with ID: {}", id);
        }
        Ok(removed)
    }

    /// Returns `(status, rows)` pairs, one per distinct stored status
    /// including `NULL`.
    pub async fn count_by_status(&self) -> Result<Vec<(Option<String>, u64)>, DbErr> {
        let rows: Vec<(Option<String>, i64)> = Anime::find()
            .select_only()
            .column(anime::Column::Status)
            .column_as(anime::Column::Id.count(), "count")
            .group_by(anime::Column::Status)
            .into_tuple()
            .all(&self.conn)
            .await?;

        debug!("Status buckets: {}", rows.len());

        Ok(rows
            .into_iter()
            .map(|(status, count)| (status, u64::try_from(count).unwrap_or_default()))
            .collect())
    }
}
