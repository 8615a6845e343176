//! Channel analytics CLI - main entry point

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use channel_analytics::{commands, metrics};
use tracing::warn;

#[derive(Parser)]
#[command(name = "channel_analytics")]
#[command(about = "Telegram channel analytics and reporting", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to expose Prometheus metrics (e.g., 0.0.0.0:9898)
    #[arg(long, env = "METRICS_ADDR")]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an engagement and growth report for a channel
    Report {
        /// Channel name from config, @username, or username
        channel: String,

        /// Reporting window in days
        #[arg(short, long)]
        days: Option<i64>,

        /// Maximum number of messages to scan
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output path for the Markdown report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also export the per-type breakdown as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also export the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show a subscriber growth forecast from stored snapshots
    Growth {
        /// Channel name from config or username
        channel: String,

        /// Restrict history to the last N days
        #[arg(short, long)]
        days: Option<i64>,
    },

    /// List channels visible in the account's dialogs
    ListChannels,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Report { .. } => "report",
            Commands::Growth { .. } => "growth",
            Commands::ListChannels => "list_channels",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("channel_analytics=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if let Some(addr) = cli.metrics_addr.as_deref() {
        match addr.parse::<SocketAddr>() {
            Ok(socket) => metrics::spawn_metrics_server(socket),
            Err(err) => warn!(%addr, "Invalid metrics address: {}", err),
        }
    }

    let command_name = cli.command.name();
    metrics::record_command_start(command_name);
    let start = Instant::now();

    let result = execute_command(cli.command).await;

    metrics::record_command_result(command_name, start.elapsed(), result.is_ok());

    result
}

async fn execute_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Report {
            channel,
            days,
            limit,
            output,
            csv,
            json,
        } => {
            commands::report::run(commands::report::ReportArgs {
                channel,
                days,
                limit,
                output,
                csv,
                json,
            })
            .await?;
        }
        Commands::Growth { channel, days } => {
            commands::growth::run(&channel, days).await?;
        }
        Commands::ListChannels => {
            commands::list_channels::run().await?;
        }
    }

    Ok(())
}
