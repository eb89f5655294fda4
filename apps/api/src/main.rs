//! # MTC Sales API Server
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (RUST_LOG, default info,mtc=debug,sqlx=warn)     │
//! │  2. Load ApiConfig from the environment                                 │
//! │  3. Open SQLite + run migrations                                        │
//! │  4. Bind the listener and serve until Ctrl+C / SIGTERM                  │
//! │  5. Close the pool                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mtc_api::{router, ApiConfig, AppState};
use mtc_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting MTC Sales API v{}", env!("CARGO_PKG_VERSION"));

    let config = ApiConfig::load().context("Failed to load configuration")?;
    let addr = config.socket_addr()?;

    info!(
        db = %config.db_path.display(),
        uploads = %config.upload_dir.display(),
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.db_path))
        .await
        .context("Failed to open database")?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.upload_dir.display()))?;

    let app = router(AppState::new(db.clone(), config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shut down");

    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=mtc_db=debug` - Debug logs for database only
/// - Default: info level, debug for our crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mtc=debug,sqlx=warn"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
