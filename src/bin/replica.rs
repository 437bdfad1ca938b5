//! Replica binary

use clap::{Parser, Subcommand};
use minibid::common::logging::init_logging;
use minibid::common::{parse_duration, Config};
use minibid::ReplicaServer;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "minibid-replica")]
#[command(about = "minibid auction replica")]
#[command(version)]
struct Cli {
    /// Config file (optional)
    #[arg(long, default_value = minibid::common::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a replica server
    Serve {
        /// Port to listen on (all interfaces)
        #[arg(long)]
        port: Option<u16>,

        /// Full bind address; `--port` wins if both are given
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Auction duration (e.g. 100s, 5m)
        #[arg(long, value_parser = duration_arg)]
        duration: Option<Duration>,

        /// Operational log file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Log level (trace, debug, info, warn, error)
        #[arg(long)]
        log_level: Option<String>,
    },
}

fn duration_arg(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config)?;

    match cli.command {
        Commands::Serve {
            port,
            bind,
            duration,
            log_file,
            log_level,
        } => {
            let level = log_level.unwrap_or_else(|| config.log_level.clone());
            let log_file = log_file
                .or_else(|| config.log_file.clone())
                .unwrap_or_else(|| PathBuf::from("auction.log"));
            init_logging(&level, Some(log_file.as_path()), true)?;

            // CLI has priority over the config file
            let replica = config
                .replica
                .clone()
                .unwrap_or_default()
                .merge_cli(bind, port, duration)?;

            ReplicaServer::new(replica).serve().await?;
        }
    }

    Ok(())
}
