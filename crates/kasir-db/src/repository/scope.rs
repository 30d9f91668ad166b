//! # Checkout Scope
//!
//! One SQLite write transaction covering every read and write of a checkout.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Scope                                    │
//! │                                                                         │
//! │  CheckoutScope::begin(pool)                                            │
//! │       │   BEGIN IMMEDIATE  (write lock taken before the first read)    │
//! │       ▼                                                                 │
//! │  scope.ledger()  ──► stock reads + guarded decrements                  │
//! │  scope.insert_header(total) ──► id, created_at                         │
//! │  scope.insert_details(details)                                         │
//! │       │                                                                 │
//! │       ├── scope.commit()  ──► all rows visible at once                 │
//! │       │                                                                 │
//! │       └── dropped (error `?`, panic, cancelled future)                 │
//! │                 ──► ROLLBACK, nothing persisted                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why IMMEDIATE
//! A deferred transaction takes only a read lock on its first SELECT. Two
//! checkouts that both read stock and then try to write would deadlock
//! into `SQLITE_BUSY`. Taking the write lock up front serializes checkouts:
//! the second one waits (up to the pool's busy timeout) and then reads the
//! stock the first one left behind.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use super::ledger::ProductLedger;
use crate::error::{DbError, DbResult};
use kasir_core::{Money, TransactionDetail};

/// Columns of a freshly inserted (or looked up) transaction header.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TransactionHeader {
    pub id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// An open checkout. Rolls back unless [`CheckoutScope::commit`] is called.
pub struct CheckoutScope {
    tx: Transaction<'static, Sqlite>,
}

impl CheckoutScope {
    /// Opens a scope, waiting for any other checkout to finish first.
    pub async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool.begin_with("BEGIN IMMEDIATE").await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            other => DbError::TransactionFailed(other.to_string()),
        })?;

        debug!("Checkout scope opened");
        Ok(CheckoutScope { tx })
    }

    /// Ledger view over this scope's connection.
    pub fn ledger(&mut self) -> ProductLedger<'_> {
        ProductLedger::new(&mut self.tx)
    }

    /// Writes the transaction header and returns its assigned id and
    /// timestamp.
    pub async fn insert_header(&mut self, total: Money) -> DbResult<TransactionHeader> {
        let header = sqlx::query_as::<_, TransactionHeader>(
            r#"
            INSERT INTO transactions (total_amount)
            VALUES (?1)
            RETURNING id, total_amount, created_at
            "#,
        )
        .bind(total.units())
        .fetch_one(&mut *self.tx)
        .await?;

        debug!(transaction_id = header.id, total = %total, "Inserted transaction header");
        Ok(header)
    }

    /// Writes every detail line, in order.
    pub async fn insert_details(&mut self, details: &[TransactionDetail]) -> DbResult<()> {
        for detail in details {
            sqlx::query(
                r#"
                INSERT INTO transaction_details (
                    transaction_id, product_id, product_name, quantity, subtotal
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(detail.transaction_id)
            .bind(detail.product_id)
            .bind(&detail.product_name)
            .bind(detail.quantity)
            .bind(detail.subtotal)
            .execute(&mut *self.tx)
            .await?;
        }

        debug!(count = details.len(), "Inserted transaction details");
        Ok(())
    }

    /// Makes every write of this scope visible. The only way to persist.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Checkout scope committed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::{memory_db, seed_product, stock_of};

    async fn transaction_count(db: &crate::Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_dropped_scope_rolls_back() {
        let db = memory_db().await;
        let product = seed_product(&db, "Gula 1kg", 16000, 5).await;

        {
            let mut scope = CheckoutScope::begin(db.pool()).await.unwrap();
            scope.ledger().decrement_stock(product.id, 2).await.unwrap();
            scope.insert_header(Money::from_units(32000)).await.unwrap();
            // dropped without commit
        }

        assert_eq!(stock_of(&db, product.id).await, 5);
        assert_eq!(transaction_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_committed_scope_persists() {
        let db = memory_db().await;
        let product = seed_product(&db, "Gula 1kg", 16000, 5).await;

        let mut scope = CheckoutScope::begin(db.pool()).await.unwrap();
        scope.ledger().decrement_stock(product.id, 2).await.unwrap();
        let header = scope.insert_header(Money::from_units(32000)).await.unwrap();
        scope
            .insert_details(&[TransactionDetail {
                transaction_id: header.id,
                product_id: product.id,
                product_name: "Gula 1kg".to_string(),
                quantity: 2,
                subtotal: 32000,
            }])
            .await
            .unwrap();
        scope.commit().await.unwrap();

        assert_eq!(header.total_amount, 32000);
        assert_eq!(stock_of(&db, product.id).await, 3);
        assert_eq!(transaction_count(&db).await, 1);
    }
}
