use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use market_data::{create_source, OkxClient, OkxConfig};
use snapshot_exporter::{probe_market_stats, ExportService, ExporterConfig, DEFAULT_PROBE_INST_ID};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exchange snapshot exporter CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch instruments, trading rules and tickers and write the CSV views
    Export {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Delay between per-type requests in milliseconds
        #[arg(short, long)]
        delay_ms: Option<u64>,
    },
    /// Check availability of funding rate, open interest and funding history
    Probe {
        /// Instrument to probe
        #[arg(short, long, default_value = DEFAULT_PROBE_INST_ID)]
        inst_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    // DEBUG=1 overrides the requested level
    let level = if std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false) {
        "debug".to_string()
    } else {
        cli.log_level.clone()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "snapshot_exporter={level},market_data={level},ranking_engine={level}"
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let okx = OkxConfig::from_env();

    match cli.command {
        Commands::Export { output_dir, delay_ms } => {
            let mut config = ExporterConfig::from_env();
            if let Some(dir) = output_dir {
                config = config.with_output_dir(dir);
            }
            if let Some(ms) = delay_ms {
                config = config.with_request_delay(Duration::from_millis(ms));
            }

            info!("Exporting from {} into {}", okx.base_url, config.output_dir.display());

            let service = ExportService::with_config(&config, &okx)?;
            match service.run().await {
                Ok(summary) => info!("Wrote {} files", summary.files_written()),
                Err(e) => {
                    error!("Export failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Probe { inst_id } => {
            let client = OkxClient::new(create_source(&okx)?);
            let report = probe_market_stats(&client, &inst_id).await;
            if !report.all_available() {
                info!("Some market statistics are unavailable for {}", inst_id);
            }
        }
    }

    Ok(())
}
