//! Dashboard server

use std::sync::Arc;

use clap::Parser;
use dashboard::flagged::load_flagged;
use dashboard::{build_router, spawn_auto_refresh, AppState, DashboardConfig};
use dotenv::dotenv;
use market_data::{create_source, OkxConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Gainers/losers dashboard server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (overrides PORT)
    #[clap(short, long)]
    addr: Option<String>,

    /// Instruments that get candle history
    #[clap(long)]
    top_n: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse(format!(
            "tower_http={level},dashboard={level},market_data={level},ranking_engine={level}",
            level = log_level
        ))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    let mut config = DashboardConfig::from_env();
    if let Some(addr) = args.addr {
        config = config.with_addr(addr);
    }
    if let Some(top_n) = args.top_n {
        config = config.with_top_n(top_n);
    }

    let okx = OkxConfig::from_env();
    let source = create_source(&okx)?;
    let flagged = load_flagged(&config.flagged_path).await;

    let addr: std::net::SocketAddr = config.addr.parse()?;
    let state = Arc::new(AppState::new(source, config, flagged));

    // Initial load, then hourly
    state.spawn_refresh();
    let timer = spawn_auto_refresh(Arc::clone(&state));

    let app = build_router(state, log_level);

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    timer.abort();

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
