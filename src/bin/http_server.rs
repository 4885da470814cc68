//! HTTP Server Binary for the Apparitions API
//!
//! Opens (and if needed creates and seeds) the SQLite catalog, then serves the
//! JSON listing and detail endpoints.
//!
//! Settings come from `DB_PATH` and `PORT` (see [`AppConfig::from_env`]);
//! flags given on the command line take precedence.
//!
//! Usage:
//!   cargo run --bin http_server -- --host 0.0.0.0 --port 8080 --db ./data.sqlite3

use apparitions::{
    config::{AppConfig, ConfigOverrides},
    http::start_server,
    storage::EventRepository,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Apparitions HTTP Server")]
#[command(about = "HTTP API server for the apparition event catalog", long_about = None)]
struct Args {
    /// Address to bind [default: 127.0.0.1]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on [default: $PORT or 8080]
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file [default: $DB_PATH or ./data.sqlite3]
    #[arg(long)]
    db: Option<String>,

    /// Sort used when a request names none [default: year_desc]
    #[arg(long)]
    default_sort: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self { db_path: args.db, host: args.host, port: args.port, default_sort: args.default_sort }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env()?.with_overrides(args.into())?;

    tracing::info!(db = config.db_path.as_str(), "opening event catalog");
    let repository = EventRepository::open_initialized(&config.db_path)?;

    let addr = config.bind_address();

    // Set up graceful shutdown
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received, stopping server...");
    };

    // Run server with graceful shutdown
    tokio::select! {
        result = start_server(&addr, repository, config) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "server error");
            }
        }
        () = shutdown_signal => {
            tracing::info!("Server shut down gracefully");
        }
    }

    Ok(())
}
