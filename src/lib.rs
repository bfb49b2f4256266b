pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::path::Path;
use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use cli::{Cli, Commands};
pub use config::Config;
use db::Store;
use metrics_exporter_prometheus::PrometheusHandle;
use services::AnimeService;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let prometheus_handle = init_observability(&config)?;

    match cli.resolved_command() {
        Commands::Serve => run_server(config, prometheus_handle).await,
        Commands::Check => cmd_check(&config).await,
        Commands::Init => cmd_init(cli.config.as_deref()),
    }
}

fn init_observability(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;
        let environment = if config.general.is_production() {
            "production"
        } else {
            "development"
        };

        let (layer, task) = tracing_loki::builder()
            .label("app", "anime-shelf")?
            .extra_field("env", environment)?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Anime Shelf v{} starting...", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);

    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running at http://{}", addr);
    info!("API endpoint: http://{}/api/anime", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    store.ping().await?;

    let stats = AnimeService::new(store).get_stats().await?;

    println!("✓ Database reachable: {}", config.general.database_path);
    println!("  Total:     {}", stats.total);
    println!("  Watching:  {}", stats.watching);
    println!("  Completed: {}", stats.completed);
    println!("  Plan:      {}", stats.plan);
    Ok(())
}

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let default_path = Config::default_config_path();
    let path = path.unwrap_or(&default_path);

    if Config::create_default_if_missing(path)? {
        println!("✓ Config file created at {}.", path.display());
    } else {
        println!("Config file already exists at {}.", path.display());
    }
    Ok(())
}
