//! # kasir-db: Database Layer for Kasir
//!
//! This crate provides database access for the Kasir backend.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /api/checkout)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasir-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐   ┌────────────┐ │   │
//! │  │   │   Database    │    │   Repositories     │   │ Migrations │ │   │
//! │  │   │   (pool.rs)   │    │                    │   │ (embedded) │ │   │
//! │  │   │               │    │ CategoryRepository │   │            │ │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepository  │   │ 001_init   │ │   │
//! │  │   │ Connection    │    │ TransactionRepo ───┼──►│            │ │   │
//! │  │   │ Management    │    │   └ CheckoutScope  │   │            │ │   │
//! │  │   │               │    │     └ ProductLedger│   │            │ │   │
//! │  │   │               │    │ ReportRepository   │   │            │ │   │
//! │  │   └───────────────┘    └────────────────────┘   └────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (DB_CONN)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (catalog, checkout, reports)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasir_db::{Database, DbConfig};
//! use kasir_core::CheckoutItem;
//!
//! let db = Database::new(DbConfig::new("kasir.db")).await?;
//!
//! let txn = db
//!     .transactions()
//!     .checkout(&[CheckoutItem { product_id: 1, quantity: 2 }])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::ledger::ProductLedger;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::scope::{CheckoutScope, TransactionHeader};
pub use repository::transaction::TransactionRepository;
