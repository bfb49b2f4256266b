use serde::{Deserialize, Serialize};

use crate::domain::WatchStatus;
use crate::entities::anime;

/// A tracked anime as stored and returned over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub id: i32,
    pub title: String,
    pub image_url: Option<String>,
    pub total_episodes: Option<i32>,
    pub episodes_watched: Option<i32>,
    pub status: Option<String>,
    pub genres: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<anime::Model> for AnimeRecord {
    fn from(model: anime::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            image_url: model.image_url,
            total_episodes: model.total_episodes,
            episodes_watched: model.episodes_watched,
            status: model.status,
            genres: model.genres,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

/// A validated create/update payload.
///
/// Every field is written on both create and update; `None` clears the
/// stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimeInput {
    pub title: String,
    pub image_url: Option<String>,
    pub total_episodes: Option<i32>,
    pub episodes_watched: Option<i32>,
    pub status: Option<WatchStatus>,
    pub genres: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimeStats {
    pub total: u64,
    pub watching: u64,
    pub completed: u64,
    pub plan: u64,
}

impl AnimeStats {
    /// Folds per-status row counts into the stats buckets.
    ///
    /// Rows with a missing or unrecognized status only contribute to `total`.
    pub fn from_status_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, u64)>,
    {
        counts
            .into_iter()
            .fold(Self::default(), |mut stats, (status, count)| {
                stats.total += count;
                match status.as_deref().and_then(|s| s.parse().ok()) {
                    Some(WatchStatus::Watching) => stats.watching += count,
                    Some(WatchStatus::Completed) => stats.completed += count,
                    Some(WatchStatus::Plan) => stats.plan += count,
                    None => {}
                }
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_ignore_unknown_statuses_outside_total() {
        let stats = AnimeStats::from_status_counts([
            (Some("watching".to_string()), 2),
            (Some("completed".to_string()), 1),
            (Some("plan".to_string()), 1),
            (Some("unknown".to_string()), 1),
        ]);

        assert_eq!(
            stats,
            AnimeStats {
                total: 5,
                watching: 2,
                completed: 1,
                plan: 1,
            }
        );
    }

    #[test]
    fn stats_count_null_status_in_total() {
        let stats = AnimeStats::from_status_counts([(None, 3), (Some("plan".to_string()), 2)]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.plan, 2);
        assert_eq!(stats.watching, 0);
    }

    #[test]
    fn stats_of_empty_store_are_zero() {
        let stats = AnimeStats::from_status_counts(std::iter::empty());
        assert_eq!(stats, AnimeStats::default());
    }

    #[test]
    fn record_serializes_absent_fields_as_null() {
        let record = AnimeRecord {
            id: 1,
            title: "Mushishi".to_string(),
            image_url: None,
            total_episodes: Some(26),
            episodes_watched: None,
            status: None,
            genres: None,
            description: None,
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["total_episodes"], 26);
        assert!(json["status"].is_null());
        assert!(json["image_url"].is_null());
    }
}
