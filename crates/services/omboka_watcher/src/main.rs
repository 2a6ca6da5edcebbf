// File: services/omboka_watcher/src/main.rs
mod cli;
mod scheduler;

use clap::Parser;
use tracing::Level;

use cli::Cli;
use omboka_common::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_with_level(if cli.debug { Level::DEBUG } else { Level::INFO });

    let config = omboka_config::load_config().expect("Failed to load config");

    // Bound keeps Duration::from_secs_f64 from panicking on absurd input.
    let interval_hours = cli.interval.unwrap_or(config.watcher.interval_hours);
    if !interval_hours.is_finite() || interval_hours <= 0.0 || interval_hours > 8760.0 {
        eprintln!("Interval must be a positive number of hours (at most a year), got {interval_hours}");
        std::process::exit(2);
    }

    scheduler::run(cli, config, interval_hours).await;
}
