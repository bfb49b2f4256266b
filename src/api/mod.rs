use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::AnimeService;
use crate::state::SharedState;

mod anime;
mod error;
mod observability;
mod system;
mod types;
pub mod validation;

pub use error::{ApiError, InternalErrorDetail};
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn anime_service(&self) -> &AnimeService {
        &self.shared.anime_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    // `/stats` and `/status/{status}` are static prefixes, so they win over
    // `/{id}` regardless of registration order.
    Router::new()
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .route(
            "/api/anime",
            get(anime::list_anime).post(anime::create_anime),
        )
        .route("/api/anime/stats", get(anime::get_anime_stats))
        .route(
            "/api/anime/status/{status}",
            get(anime::list_anime_by_status),
        )
        .route(
            "/api/anime/{id}",
            get(anime::get_anime)
                .put(anime::update_anime)
                .delete(anime::delete_anime),
        )
        .fallback(system::route_not_found)
        .method_not_allowed_fallback(system::route_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            observability::expose_error_details,
        ))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
