//! # Product Ledger
//!
//! Stock reads and decrements performed inside a checkout scope.
//!
//! The ledger borrows the scope's connection, so every read and write it
//! makes belongs to the same SQLite transaction and disappears with it on
//! rollback.
//!
//! ## Guarded Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE product SET stock = stock - :qty                               │
//! │  WHERE id = :id AND stock >= :qty                                      │
//! │                                                                         │
//! │  rows_affected = 1  → decremented                                      │
//! │  rows_affected = 0  → product gone, or stock < qty                     │
//! │                       (re-read to tell which)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The WHERE guard keeps stock non-negative even if a caller skips the
//! snapshot check.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use kasir_core::checkout::StockSnapshot;
use kasir_core::CoreError;

/// Stock operations bound to one open checkout scope.
pub struct ProductLedger<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ProductLedger<'c> {
    /// Wraps the connection of an open scope.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ProductLedger { conn }
    }

    /// Reads name, price and stock of a product.
    ///
    /// ## Errors
    /// `CoreError::ProductNotFound` if no product has `product_id`.
    pub async fn get_for_checkout(&mut self, product_id: i64) -> DbResult<StockSnapshot> {
        debug!(product_id = product_id, "Reading stock for checkout");

        let snapshot = sqlx::query_as::<_, StockSnapshot>(
            r#"
            SELECT name, price, stock
            FROM product
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        snapshot.ok_or_else(|| CoreError::ProductNotFound { product_id }.into())
    }

    /// Removes `quantity` units from a product's stock.
    ///
    /// ## Errors
    /// - `CoreError::InsufficientStock` if fewer than `quantity` units remain
    /// - `CoreError::ProductNotFound` if the product does not exist
    pub async fn decrement_stock(&mut self, product_id: i64, quantity: i64) -> DbResult<()> {
        debug!(product_id = product_id, quantity = quantity, "Decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE product SET stock = stock - ?2
            WHERE id = ?1 AND stock >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let available: Option<i64> = sqlx::query_scalar("SELECT stock FROM product WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(&mut *self.conn)
            .await?;

        let err = match available {
            Some(available) => CoreError::InsufficientStock {
                product_id,
                requested: quantity,
                available,
            },
            None => CoreError::ProductNotFound { product_id },
        };

        Err(err.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
