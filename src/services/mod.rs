pub mod anime_service;
pub use anime_service::{AnimeError, AnimeService};
