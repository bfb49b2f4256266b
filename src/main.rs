use anime_shelf::cli::{Cli, Commands};
use anime_shelf::{Config, cmd_init, run};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // `init` must work before any config file exists.
    if cli.resolved_command() == Commands::Init {
        return cmd_init(cli.config.as_deref());
    }

    let config = Config::load(cli.config.as_deref())?;
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli, config))
}
