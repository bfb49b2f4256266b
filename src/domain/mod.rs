//! Domain primitives for the anime shelf.
//!
//! Newtypes here keep raw integers and status strings from leaking across
//! the boundary between the HTTP layer and the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a tracked anime record.
///
/// # Examples
///
/// ```rust
/// use anime_shelf::domain::AnimeId;
///
/// let id = AnimeId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnimeId(i32);

impl AnimeId {
    /// Creates a new `AnimeId` from a raw i32 value.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id` is negative. Ids coming from requests
    /// go through the validation gate first.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "AnimeId should be non-negative");
        Self(id)
    }

    /// Returns the underlying i32 value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for AnimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AnimeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

/// Watch status of a record.
///
/// The store keeps status as free text, so rows written outside the
/// service may hold values that do not map to any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    Watching,
    Completed,
    Plan,
}

impl WatchStatus {
    pub const ALL: [Self; 3] = [Self::Watching, Self::Completed, Self::Plan];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::Plan => "plan",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown watch status: {0}")]
pub struct UnknownWatchStatus(pub String);

impl FromStr for WatchStatus {
    type Err = UnknownWatchStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownWatchStatus(s.to_string()))
    }
}
