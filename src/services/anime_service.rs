//! Domain service for the anime shelf.
//!
//! Handlers never touch the store directly; every read and mutation goes
//! through [`AnimeService`], which also classifies store failures into
//! [`AnimeError`] variants the HTTP layer knows how to render.

use crate::db::Store;
use crate::domain::AnimeId;
use crate::models::anime::{AnimeInput, AnimeRecord, AnimeStats};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Store failures, classified.
///
/// A missing record is not an error here: lookups return `Option` and
/// mutations return whether a row was touched.
#[derive(Debug, Error)]
pub enum AnimeError {
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DbErr> for AnimeError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Duplicate(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::InvalidReference(detail),
            _ => Self::Database(err.to_string()),
        }
    }
}

/// CRUD and aggregate operations over anime records.
///
/// Each call is a single statement against the pool. There is no locking
/// or versioning; concurrent writes to the same id are last-write-wins.
#[derive(Clone)]
pub struct AnimeService {
    store: Store,
}

impl AnimeService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Lists every record, newest first.
    pub async fn list_all(&self) -> Result<Vec<AnimeRecord>, AnimeError> {
        Ok(self.store.list_all_anime().await?)
    }

    pub async fn get_by_id(&self, id: AnimeId) -> Result<Option<AnimeRecord>, AnimeError> {
        Ok(self.store.get_anime(id.value()).await?)
    }

    /// Persists a new record and returns its id.
    ///
    /// # Errors
    ///
    /// - [`AnimeError::Duplicate`] if the title is already on the shelf
    /// - [`AnimeError::InvalidReference`] on a foreign-key violation
    /// - [`AnimeError::Database`] on any other store failure
    pub async fn create(&self, input: &AnimeInput) -> Result<AnimeId, AnimeError> {
        let id = self.store.add_anime(input).await?;
        Ok(AnimeId::new(id))
    }

    /// Replaces every editable field of the record. Returns `false` when no
    /// record has this id.
    pub async fn update(&self, id: AnimeId, input: &AnimeInput) -> Result<bool, AnimeError> {
        Ok(self.store.update_anime(id.value(), input).await?)
    }

    /// Hard-deletes the record. Returns `false` when no record has this id.
    pub async fn delete(&self, id: AnimeId) -> Result<bool, AnimeError> {
        Ok(self.store.remove_anime(id.value()).await?)
    }

    /// Exact-match status filter, newest first. The status is not checked
    /// against the known set; unknown values simply match nothing.
    pub async fn get_by_status(&self, status: &str) -> Result<Vec<AnimeRecord>, AnimeError> {
        Ok(self.store.list_anime_by_status(status).await?)
    }

    pub async fn get_stats(&self) -> Result<AnimeStats, AnimeError> {
        let counts = self.store.anime_count_by_status().await?;
        Ok(AnimeStats::from_status_counts(counts))
    }
}
