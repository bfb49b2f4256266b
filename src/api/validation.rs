use serde_json::Value;

use super::{AnimePayload, ApiError};
use crate::domain::{AnimeId, WatchStatus};
use crate::models::anime::AnimeInput;

const TITLE_REQUIRED: &str = "Title is required and must be a non-empty string";
const TOTAL_EPISODES_INVALID: &str = "Total episodes must be a positive number";
const EPISODES_WATCHED_INVALID: &str = "Episodes watched must be a non-negative number";
const EPISODES_WATCHED_EXCEEDS_TOTAL: &str = "Episodes watched cannot exceed total episodes";

pub fn validate_anime_id(raw: &str) -> Result<AnimeId, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id >= 1 => Ok(AnimeId::new(id)),
        _ => Err(ApiError::InvalidId),
    }
}

/// Runs every field rule over a create/update body.
///
/// All violations are reported together, in field order. Cross-field checks
/// only look at the payload itself, never at what is already stored.
pub fn validate_anime_payload(payload: AnimePayload) -> Result<AnimeInput, ApiError> {
    let mut errors = Vec::new();

    let title = match payload.title {
        Some(Value::String(title)) if !title.trim().is_empty() => Some(title),
        _ => {
            errors.push(TITLE_REQUIRED.to_string());
            None
        }
    };

    let total_episodes = match payload.total_episodes.as_ref().map(parse_integer) {
        None => Ok(None),
        Some(Some(total)) if total >= 1 => Ok(Some(total)),
        Some(_) => Err(()),
    };
    if total_episodes.is_err() {
        errors.push(TOTAL_EPISODES_INVALID.to_string());
    }

    let episodes_watched = match payload.episodes_watched.as_ref().map(parse_integer) {
        None => Ok(None),
        Some(Some(watched)) if watched >= 0 => Ok(Some(watched)),
        Some(_) => Err(()),
    };
    if episodes_watched.is_err() {
        errors.push(EPISODES_WATCHED_INVALID.to_string());
    }

    if let (Ok(Some(total)), Ok(Some(watched))) = (total_episodes, episodes_watched) {
        if watched > total {
            errors.push(EPISODES_WATCHED_EXCEEDS_TOTAL.to_string());
        }
    }

    let status = match payload.status {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s.parse::<WatchStatus>().map(Some).map_err(|_| ()),
        Some(_) => Err(()),
    };
    if status.is_err() {
        let allowed: Vec<&str> = WatchStatus::ALL.iter().map(WatchStatus::as_str).collect();
        errors.push(format!("Status must be one of: {}", allowed.join(", ")));
    }

    match (title, total_episodes, episodes_watched, status) {
        (Some(title), Ok(total_episodes), Ok(episodes_watched), Ok(status))
            if errors.is_empty() =>
        {
            Ok(AnimeInput {
                title,
                image_url: payload.image_url,
                total_episodes,
                episodes_watched,
                status,
                genres: payload.genres,
                description: payload.description,
            })
        }
        _ => Err(ApiError::validation(errors)),
    }
}

/// Accepts JSON integers, integral floats, and strings holding a decimal
/// integer. Anything outside the `i32` range is rejected.
#[allow(clippy::cast_possible_truncation)]
fn parse_integer(value: &Value) -> Option<i32> {
    let wide = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    i32::try_from(wide).ok()
}
