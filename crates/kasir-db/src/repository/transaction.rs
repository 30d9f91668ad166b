//! # Transaction Repository
//!
//! The checkout engine, plus lookups of committed transactions.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      checkout(items)                                    │
//! │                                                                         │
//! │  1. PendingCheckout::new(items)                                        │
//! │     └── empty list / qty ≤ 0 → InvalidInput  (store never touched)     │
//! │                                                                         │
//! │  2. CheckoutScope::begin  (BEGIN IMMEDIATE)                            │
//! │                                                                         │
//! │  3. FOR EACH item, in caller order                                     │
//! │     ├── ledger.get_for_checkout(id)  → ProductNotFound                 │
//! │     ├── pending.price_line(..)       → InsufficientStock / overflow    │
//! │     └── ledger.decrement_stock(..)                                     │
//! │                                                                         │
//! │  4. insert_header(total)  → id, created_at                             │
//! │  5. insert_details(pending.into_details(id))                           │
//! │  6. commit                                                             │
//! │                                                                         │
//! │  Any `?` between 2 and 6 drops the scope → ROLLBACK                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same product may appear on several lines. Each line reads the stock
//! left behind by the previous line, so two lines of 3 against a stock of 5
//! fail on the second line.

use futures_util::{Stream, TryStreamExt};
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use super::scope::{CheckoutScope, TransactionHeader};
use crate::error::{DbError, DbResult};
use kasir_core::checkout::PendingCheckout;
use kasir_core::{CheckoutItem, Transaction, TransactionDetail};

/// Repository for checkouts and committed transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Checks out a list of items as one all-or-nothing transaction.
    ///
    /// ## Returns
    /// The committed transaction with its details in caller order.
    ///
    /// ## Errors
    /// - `CoreError::InvalidInput` - empty list, non-positive quantity, or an
    ///   amount that does not fit in an i64
    /// - `CoreError::ProductNotFound` - an item names an unknown product
    /// - `CoreError::InsufficientStock` - a line asks for more than remains
    /// - any storage error
    ///
    /// On error no stock changes and no rows are written.
    pub async fn checkout(&self, items: &[CheckoutItem]) -> DbResult<Transaction> {
        let pending = PendingCheckout::new(items)?;

        match self.run_checkout(pending, items).await {
            Ok(transaction) => {
                info!(
                    transaction_id = transaction.id,
                    total = %transaction.total(),
                    lines = transaction.details.len(),
                    "Checkout committed"
                );
                Ok(transaction)
            }
            Err(e) if e.is_storage_failure() => {
                error!(error = %e, "Checkout failed");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Checkout rejected");
                Err(e)
            }
        }
    }

    async fn run_checkout(
        &self,
        mut pending: PendingCheckout,
        items: &[CheckoutItem],
    ) -> DbResult<Transaction> {
        let mut scope = CheckoutScope::begin(&self.pool).await?;

        for item in items {
            let mut ledger = scope.ledger();

            let snapshot = ledger.get_for_checkout(item.product_id).await?;
            let line = pending.price_line(item, &snapshot)?;
            debug!(
                product_id = line.product_id,
                quantity = line.quantity,
                subtotal = %line.subtotal,
                "Priced checkout line"
            );

            ledger.decrement_stock(item.product_id, item.quantity).await?;
        }

        let header = scope.insert_header(pending.total()).await?;
        let details = pending.into_details(header.id);
        scope.insert_details(&details).await?;

        scope.commit().await?;

        Ok(Transaction {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at,
            details,
        })
    }

    /// Streams the detail lines of a transaction in insertion order.
    pub fn stream_details(
        &self,
        transaction_id: i64,
    ) -> impl Stream<Item = DbResult<TransactionDetail>> + '_ {
        sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(transaction_id)
        .fetch(&self.pool)
        .map_err(DbError::from)
    }

    /// Gets a committed transaction with its details.
    ///
    /// ## Returns
    /// * `Ok(Some(Transaction))` - Transaction found
    /// * `Ok(None)` - Transaction not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        debug!(id = id, "Getting transaction");

        let header = sqlx::query_as::<_, TransactionHeader>(
            r#"
            SELECT id, total_amount, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let details: Vec<TransactionDetail> = self.stream_details(header.id).try_collect().await?;

        Ok(Some(Transaction {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at,
            details,
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
