//! # Kasir API
//!
//! HTTP server for the catalog, checkout and sales reports.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Kasir API                                    │
//! │                                                                         │
//! │  GET    /health                      database reachability             │
//! │                                                                         │
//! │  GET    /api/category                list                              │
//! │  POST   /api/category                create                            │
//! │  GET    /api/category/{id}           get                               │
//! │  PUT    /api/category/{id}           update                            │
//! │  DELETE /api/category/{id}           delete                            │
//! │                                                                         │
//! │  GET    /api/product?name=           list / search                     │
//! │  POST   /api/product                 create                            │
//! │  GET    /api/product/{id}            get (with category)               │
//! │  PUT    /api/product/{id}            update                            │
//! │  DELETE /api/product/{id}            delete                            │
//! │                                                                         │
//! │  POST   /api/checkout                atomic checkout → 201             │
//! │  GET    /api/transaction/{id}        transaction with details          │
//! │                                                                         │
//! │  GET    /api/report?start_date=&end_date=                              │
//! │  GET    /api/report/today                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - HTTP port (required)
//! - `DB_CONN` - SQLite file path or `:memory:` (required)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0)
//! - `RUST_LOG` - Log filter (default: `info,kasir=debug,sqlx=warn`)

pub mod config;
pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use kasir_db::Database;
use tracing_subscriber::EnvFilter;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
///
/// Handlers get repositories from `db` per request; nothing else is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the full route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/category",
            get(handlers::category::list).post(handlers::category::create),
        )
        .route(
            "/api/category/{id}",
            get(handlers::category::get)
                .put(handlers::category::update)
                .delete(handlers::category::delete),
        )
        .route(
            "/api/product",
            get(handlers::product::list).post(handlers::product::create),
        )
        .route(
            "/api/product/{id}",
            get(handlers::product::get)
                .put(handlers::product::update)
                .delete(handlers::product::delete),
        )
        .route(
            "/api/checkout",
            axum::routing::post(handlers::checkout::checkout),
        )
        .route("/api/transaction/{id}", get(handlers::transaction::get))
        .route("/api/report", get(handlers::report::range))
        .route("/api/report/today", get(handlers::report::today))
        .with_state(state)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kasir_db=trace` - Show trace for the database crate only
/// - Default: INFO, with DEBUG for kasir crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kasir=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

// =============================================================================
// Test Helpers
// =============================================================================
