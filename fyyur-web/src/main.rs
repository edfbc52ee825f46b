//! fyyur-web - main entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use fyyur_common::config::{load_toml_config, Config, ConfigOverrides};
use fyyur_common::db::init_database;
use fyyur_web::{build_router, logging, AppState};

/// Command-line arguments for fyyur-web
#[derive(Parser, Debug)]
#[command(name = "fyyur-web")]
#[command(about = "Venue and artist booking site")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "FYYUR_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "FYYUR_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "FYYUR_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "FYYUR_DATABASE")]
    database: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FYYUR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Also append logs to this file
    #[arg(long, env = "FYYUR_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = Config::resolve(
        ConfigOverrides {
            host: args.host,
            port: args.port,
            database_path: args.database,
            log_level: args.log_level,
            log_file: args.log_file,
        },
        toml_config,
    );

    logging::init_tracing(&config)?;

    info!("Starting fyyur-web v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database_path.display());

    let db = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let app = build_router(AppState::new(db.clone()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
