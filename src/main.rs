// src/main.rs

//! jobwire CLI
//!
//! Runs the fetch → dedup → publish cycle once with `--once`, or forever on
//! the configured interval.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::time::{self, MissedTickBehavior};

use jobwire::channels::build_channels;
use jobwire::config::Config;
use jobwire::error::Result;
use jobwire::pipeline::{CycleRunner, LocationFilter};
use jobwire::sources::build_sources;
use jobwire::store::SqliteStore;
use jobwire::utils::http;

/// jobwire - IT job aggregation and fan-publish engine
#[derive(Parser, Debug)]
#[command(name = "jobwire", version, about = "IT job aggregation engine")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Run exactly one cycle and exit
    #[arg(long)]
    once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("jobwire starting...");

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env();
    config.validate()?;

    // Store initialization is the only fatal failure: without the dedup
    // table nothing downstream is safe to run.
    let store = Arc::new(SqliteStore::open(&config.engine.db_path)?);

    let client = http::create_async_client(&config.engine)?;
    let runner = CycleRunner::new(
        build_sources(&config.sources, client.clone()),
        build_channels(&config.channels, client),
        store,
        LocationFilter::new(&config.filter),
        config.engine.max_concurrent,
    );

    if cli.once {
        runner.run().await?;
        log::info!("Done!");
        return Ok(());
    }

    let interval_minutes = config.engine.fetch_interval_minutes;
    log::info!("Scheduler started. Running every {interval_minutes} minutes.");

    let mut interval = time::interval(Duration::from_secs(interval_minutes * 60));
    // A long cycle delays the next tick instead of stacking ticks; cycles
    // never overlap. The first tick fires immediately.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if let Err(e) = runner.run().await {
            log::error!("Cycle aborted: {e}");
        }
    }
}
