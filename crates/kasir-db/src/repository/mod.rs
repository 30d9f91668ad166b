//! # Repository Module
//!
//! Database repository implementations for Kasir.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Touches Which Tables                             │
//! │                                                                         │
//! │  CategoryRepository ──────────► category                               │
//! │  ProductRepository  ──────────► product (+ category join)              │
//! │                                                                         │
//! │  TransactionRepository::checkout                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutScope (BEGIN IMMEDIATE … COMMIT)                              │
//! │       ├── ProductLedger ──────► product.stock (read + guarded UPDATE)  │
//! │       └── insert_* ───────────► transactions, transaction_details      │
//! │                                                                         │
//! │  ReportRepository   ──────────► transactions ⋈ transaction_details     │
//! │                                  (read only)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is written in exactly two places: the ledger's guarded decrement
//! inside a checkout scope, and an explicit product update.
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`product::ProductRepository`] - Product CRUD and name search
//! - [`transaction::TransactionRepository`] - Checkout and transaction lookup
//! - [`report::ReportRepository`] - Date-ranged sales aggregates

pub mod category;
pub mod ledger;
pub mod product;
pub mod report;
pub mod scope;
pub mod transaction;

#[cfg(test)]
pub(crate) mod testing;
