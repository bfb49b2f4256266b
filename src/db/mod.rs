use crate::config::GeneralConfig;
use crate::models::anime::{AnimeInput, AnimeRecord};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Pooled handle to the anime database.
///
/// Cloning is cheap; every clone shares the same bounded pool. Callers wait
/// for a free connection when the pool is saturated.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

/// On-disk file behind a `sqlite:` URL, without connection parameters.
/// `None` for in-memory databases.
fn database_file(db_url: &str) -> Option<&Path> {
    let rest = db_url.trim_start_matches("sqlite:");
    let rest = rest.trim_start_matches("//");
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(Path::new(path))
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1, Duration::from_secs(10)).await
    }

    pub async fn from_config(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
            Duration::from_secs(general.acquire_timeout_seconds),
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path) = database_file(db_url) {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !path.exists() {
                std::fs::File::create(path)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(acquire_timeout)
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

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    pub async fn list_all_anime(&self) -> Result<Vec<AnimeRecord>, DbErr> {
        self.anime_repo().list_all().await
    }

    pub async fn list_anime_by_status(&self, status: &str) -> Result<Vec<AnimeRecord>, DbErr> {
        self.anime_repo().list_by_status(status).await
    }

    pub async fn get_anime(&self, id: i32) -> Result<Option<AnimeRecord>, DbErr> {
        self.anime_repo().get(id).await
    }

    pub async fn add_anime(&self, input: &AnimeInput) -> Result<i32, DbErr> {
        self.anime_repo().insert(input).await
    }

    pub async fn update_anime(&self, id: i32, input: &AnimeInput) -> Result<bool, DbErr> {
        self.anime_repo().update(id, input).await
    }

    pub async fn remove_anime(&self, id: i32) -> Result<bool, DbErr> {
        self.anime_repo().remove(id).await
    }

    pub async fn anime_count_by_status(&self) -> Result<Vec<(Option<String>, u64)>, DbErr> {
        self.anime_repo().count_by_status().await
    }
}
