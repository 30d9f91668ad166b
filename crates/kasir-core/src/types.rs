//! # Domain Types
//!
//! Core domain types used throughout Kasir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄──│    Product      │   │    Transaction      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  id                 │   │
//! │  │  name           │   │  name, price    │   │  total_amount       │   │
//! │  │  description    │   │  stock          │   │  created_at         │   │
//! │  └─────────────────┘   │  category_id    │   │  details ─────┐     │   │
//! │                        └─────────────────┘   └───────────────┼─────┘   │
//! │                                                              ▼         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  CheckoutItem   │   │ ReportResponse  │   │ TransactionDetail   │   │
//! │  │  (request)      │   │ (computed)      │   │ name snapshot,      │   │
//! │  │  product_id,qty │   │ revenue, count  │   │ quantity, subtotal  │   │
//! │  └─────────────────┘   │ best_seller     │   └─────────────────────┘   │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `TransactionDetail` copies the product name at checkout time. Renaming or
//! deleting the product later never rewrites sales history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Fields accepted when creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,

    /// Display name, copied into each transaction detail at checkout.
    pub name: String,

    /// Unit price in whole currency units.
    pub price: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    pub category_id: i64,

    /// The owning category, when the read path joined it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub category_id: i64,
}

// =============================================================================
// Checkout
// =============================================================================

/// One line of a checkout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// A committed line of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    pub transaction_id: i64,
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// quantity × unit price at time of sale.
    pub subtotal: i64,
}

/// A committed checkout. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total_amount)
    }

}

// =============================================================================
// Reports
// =============================================================================

/// The most-sold product in a reporting window.
///
/// Empty name and zero quantity when nothing was sold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSeller {
    pub name: String,
    pub qty_sold: i64,
}

/// Aggregates over an inclusive date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub total_revenue: i64,
    pub total_transactions: i64,
    pub best_seller: BestSeller,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_omits_missing_category() {
        let product = Product {
            id: 1,
            name: "Teh".to_string(),
            price: 500,
            stock: 3,
            category_id: 2,
            category: None,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("category").is_none());
        assert_eq!(json["category_id"], 2);
    }

    #[test]
    fn test_category_input_description_defaults() {
        let input: CategoryInput = serde_json::from_str(r#"{"name":"Minuman"}"#).unwrap();
        assert_eq!(input.description, "");
    }

    #[test]
    fn test_empty_report_default() {
        let report = ReportResponse::default();
        assert_eq!(report.total_revenue, 0);
        assert_eq!(report.total_transactions, 0);
        assert_eq!(report.best_seller, BestSeller::default());
    }
}
