//! # Checkout Lines
//!
//! The pure half of a checkout: turning `(item, ledger snapshot)` pairs into
//! priced lines and a running total.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One checkout (kasir-db)                             │
//! │                                                                         │
//! │  PendingCheckout::new(items)          ← rejects empty / qty ≤ 0         │
//! │       │                                                                 │
//! │       ▼  for each item, in caller order                                 │
//! │  ledger.get_for_checkout(id)  ──► StockSnapshot                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pending.price_line(item, snapshot)   ← THIS MODULE                     │
//! │       │   stock check, price × qty, total += subtotal                   │
//! │       ▼                                                                 │
//! │  ledger.decrement_stock(id, qty)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert header → id                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pending.into_details(id)             ← THIS MODULE (stamp id)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line has no transaction id until the header exists, so pending lines
//! and committed [`TransactionDetail`]s are separate types.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CheckoutItem, TransactionDetail};
use crate::validation::validate_checkout_items;

/// What the ledger knows about a product when a checkout line reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockSnapshot {
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

/// A priced line waiting for its transaction id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Lines accumulated so far in one checkout, in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheckout {
    lines: Vec<PendingLine>,
    total: Money,
}

impl PendingCheckout {
    /// Starts a checkout for `items`, rejecting malformed requests.
    ///
    /// ## Errors
    /// `CoreError::InvalidInput` if `items` is empty or any quantity is ≤ 0.
    pub fn new(items: &[CheckoutItem]) -> CoreResult<Self> {
        validate_checkout_items(items)?;

        Ok(PendingCheckout {
            lines: Vec::with_capacity(items.len()),
            total: Money::zero(),
        })
    }

    /// Prices one line against the ledger's current view of the product.
    ///
    /// ## What This Does
    /// 1. Fails with `InsufficientStock` if `snapshot.stock < item.quantity`
    /// 2. Computes `subtotal = price × quantity`
    /// 3. Adds the subtotal to the running total
    /// 4. Appends the line
    ///
    /// Nothing is appended when an error is returned.
    pub fn price_line(
        &mut self,
        item: &CheckoutItem,
        snapshot: &StockSnapshot,
    ) -> CoreResult<&PendingLine> {
        if snapshot.stock < item.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: item.product_id,
                requested: item.quantity,
                available: snapshot.stock,
            });
        }

        let subtotal = Money::from_units(snapshot.price)
            .line_total(item.quantity)
            .ok_or_else(|| ValidationError::Overflow {
                field: "subtotal".to_string(),
            })?;

        let total = self
            .total
            .checked_add(subtotal)
            .ok_or_else(|| ValidationError::Overflow {
                field: "total_amount".to_string(),
            })?;

        self.total = total;
        self.lines.push(PendingLine {
            product_id: item.product_id,
            product_name: snapshot.name.clone(),
            quantity: item.quantity,
            subtotal,
        });

        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Running total of all priced lines.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// Stamps `transaction_id` onto every line.
    pub fn into_details(self, transaction_id: i64) -> Vec<TransactionDetail> {
        self.lines
            .into_iter()
            .map(|line| TransactionDetail {
                transaction_id,
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                subtotal: line.subtotal.units(),
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i64, quantity: i64) -> CheckoutItem {
        CheckoutItem {
            product_id,
            quantity,
        }
    }

    fn snapshot(name: &str, price: i64, stock: i64) -> StockSnapshot {
        StockSnapshot {
            name: name.to_string(),
            price,
            stock,
        }
    }

    #[test]
    fn test_rejects_empty_and_non_positive() {
        assert!(matches!(
            PendingCheckout::new(&[]),
            Err(CoreError::InvalidInput(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            PendingCheckout::new(&[item(1, 2), item(2, 0)]),
            Err(CoreError::InvalidInput(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_two_products_total() {
        let items = [item(1, 2), item(2, 1)];
        let mut pending = PendingCheckout::new(&items).unwrap();

        pending.price_line(&items[0], &snapshot("A", 1000, 10)).unwrap();
        pending.price_line(&items[1], &snapshot("B", 2000, 10)).unwrap();

        assert_eq!(pending.total().units(), 4000);
        let subtotals: Vec<i64> = pending.into_details(1).iter().map(|d| d.subtotal).collect();
        assert_eq!(subtotals, vec![2000, 2000]);
    }

    #[test]
    fn test_insufficient_stock_leaves_lines_untouched() {
        let items = [item(1, 3), item(1, 3)];
        let mut pending = PendingCheckout::new(&items).unwrap();

        pending.price_line(&items[0], &snapshot("P", 1000, 5)).unwrap();
        let err = pending
            .price_line(&items[1], &snapshot("P", 1000, 2))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: 1,
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(pending.total().units(), 3000);
        assert_eq!(pending.into_details(1).len(), 1);
    }

    #[test]
    fn test_exact_stock_is_sellable() {
        let items = [item(9, 4)];
        let mut pending = PendingCheckout::new(&items).unwrap();
        assert!(pending.price_line(&items[0], &snapshot("X", 10, 4)).is_ok());
    }

    #[test]
    fn test_overflow_is_invalid_input() {
        let items = [item(1, 2)];
        let mut pending = PendingCheckout::new(&items).unwrap();

        let err = pending
            .price_line(&items[0], &snapshot("Gold", i64::MAX, 10))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(ValidationError::Overflow { .. })
        ));
        assert_eq!(pending.total(), Money::zero());
        assert!(pending.into_details(1).is_empty());
    }

    #[test]
    fn test_into_details_stamps_id_and_keeps_order() {
        let items = [item(5, 1), item(3, 2)];
        let mut pending = PendingCheckout::new(&items).unwrap();
        pending.price_line(&items[0], &snapshot("Lima", 100, 9)).unwrap();
        pending.price_line(&items[1], &snapshot("Tiga", 300, 9)).unwrap();

        let details = pending.into_details(77);

        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.transaction_id == 77));
        assert_eq!(details[0].product_id, 5);
        assert_eq!(details[0].product_name, "Lima");
        assert_eq!(details[1].product_id, 3);
        assert_eq!(details[1].subtotal, 600);
    }
}
