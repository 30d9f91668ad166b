//! # Validation Module
//!
//! Input validation utilities for Kasir.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum Json / Query)                          │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation, before any SQL runs                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (stock >= 0), CHECK (price >= 0)                            │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{CategoryInput, CheckoutItem, ProductInput};
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Checkout
// =============================================================================

/// Validates a checkout request before the store is touched.
///
/// ## Rules
/// - At least one item
/// - Every quantity > 0
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_checkout_items;
/// use kasir_core::CheckoutItem;
///
/// assert!(validate_checkout_items(&[]).is_err());
/// assert!(validate_checkout_items(&[CheckoutItem { product_id: 1, quantity: 0 }]).is_err());
/// assert!(validate_checkout_items(&[CheckoutItem { product_id: 1, quantity: 2 }]).is_ok());
/// ```
pub fn validate_checkout_items(items: &[CheckoutItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::required("items"));
    }

    for (index, item) in items.iter().enumerate() {
        validate_quantity(index, item.quantity)?;
    }

    Ok(())
}

/// Validates the quantity of the checkout line at `index`.
pub fn validate_quantity(index: usize, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: format!("items[{}].quantity", index),
        });
    }

    Ok(())
}

// =============================================================================
// Catalog
// =============================================================================

/// Validates a category or product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category payload.
pub fn validate_category(input: &CategoryInput) -> ValidationResult<()> {
    validate_name("name", &input.name)
}

/// Validates a product payload.
///
/// ## Rules
/// - Name as in [`validate_name`]
/// - price ≥ 0 (free items are allowed)
/// - stock ≥ 0
/// - category_id must be set; existence is checked by the repository
pub fn validate_product(input: &ProductInput) -> ValidationResult<()> {
    validate_name("name", &input.name)?;

    if input.price < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if input.stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    if input.category_id <= 0 {
        return Err(ValidationError::required("category_id"));
    }

    Ok(())
}

// =============================================================================
// Reports
// =============================================================================

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

/// Rejects a reversed report window.
///
/// The report query itself does not check this; callers validate first.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> ValidationResult<()> {
    if start > end {
        return Err(ValidationError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
