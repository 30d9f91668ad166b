//! # Kasir API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  init_tracing()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiConfig::load()      ← PORT, DB_CONN, ... (fails fast if missing)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new()        ← pool + migrations                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum::serve(..).with_graceful_shutdown(Ctrl+C | SIGTERM)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close()                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing::info;

use kasir_api::{init_tracing, router, ApiConfig, AppState};
use kasir_db::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Kasir API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        db = %config.db_conn,
        max_connections = config.db_max_connections,
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    let app = router(AppState::new(db.clone()));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
