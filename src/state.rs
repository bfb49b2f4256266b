use crate::config::Config;
use crate::db::Store;
use crate::services::AnimeService;

/// Long-lived handles built once at startup and shared by every request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub anime_service: AnimeService,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.general).await?;
        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let anime_service = AnimeService::new(store.clone());

        Self {
            config,
            store,
            anime_service,
        }
    }
}
