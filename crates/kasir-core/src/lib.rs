//! # kasir-core: Pure Business Logic for Kasir
//!
//! This crate holds the domain model of the Kasir backend and every rule that
//! can be decided without touching the database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /api/category, /api/product, /api/checkout, /api/report      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ Pending   │  │   rules   │  │   │
//! │  │   │Transaction│  │ checked × │  │ Checkout  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │        SQLite, ledger, checkout scope, report queries           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Transaction, ReportResponse)
//! - [`money`] - Money type with checked integer arithmetic
//! - [`checkout`] - Line pricing and total accumulation for one checkout
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::{PendingCheckout, StockSnapshot};
//! use kasir_core::CheckoutItem;
//!
//! let items = vec![CheckoutItem { product_id: 1, quantity: 2 }];
//! let mut pending = PendingCheckout::new(&items).unwrap();
//!
//! let snapshot = StockSnapshot { name: "Kopi".to_string(), price: 1000, stock: 10 };
//! pending.price_line(&items[0], &snapshot).unwrap();
//!
//! assert_eq!(pending.total().units(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a category or product name.
pub const MAX_NAME_LEN: usize = 100;
