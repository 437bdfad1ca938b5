//! Coordinator binary: interactive console over the replica set

use clap::Parser;
use minibid::common::logging::init_logging;
use minibid::common::{parse_duration, Config};
use minibid::coordinator::console::run_console;
use minibid::Coordinator;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "minibid-coord")]
#[command(about = "minibid coordinator console")]
#[command(version)]
struct Cli {
    /// Config file (optional)
    #[arg(long, default_value = minibid::common::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Replica URL; repeat for each replica, in query order
    #[arg(long = "replica")]
    replicas: Vec<String>,

    /// Per-replica bound for a query
    #[arg(long, value_parser = duration_arg)]
    query_timeout: Option<Duration>,

    /// Per-replica bound for a bid (client default if unset)
    #[arg(long, value_parser = duration_arg)]
    bid_timeout: Option<Duration>,

    /// Operational log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn duration_arg(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config)?;

    // The console owns stdout, so the log only goes to the file.
    let level = cli.log_level.unwrap_or_else(|| config.log_level.clone());
    let log_file = cli
        .log_file
        .or_else(|| config.log_file.clone())
        .unwrap_or_else(|| PathBuf::from("program.log"));
    init_logging(&level, Some(log_file.as_path()), false)?;

    let mut coord_config = config.coordinator.clone().unwrap_or_default();
    if !cli.replicas.is_empty() {
        coord_config.replicas = cli.replicas;
    }
    if let Some(timeout) = cli.query_timeout {
        coord_config.query_timeout_ms = timeout.as_millis() as u64;
    }
    if let Some(timeout) = cli.bid_timeout {
        coord_config.bid_timeout_ms = Some(timeout.as_millis() as u64);
    }

    let coordinator = Coordinator::new(&coord_config)?;
    tracing::info!(
        replicas = ?coord_config.replicas,
        "Coordinator started"
    );

    run_console(
        &coordinator,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    )
    .await?;

    Ok(())
}
