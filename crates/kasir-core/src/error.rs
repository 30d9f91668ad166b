//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Checkout failures and invalid input            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures, wraps CoreError              │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant aborts the checkout it was raised in. None of them are
/// retried by the engine; the caller decides what to do next.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The request itself is malformed: empty item list, non-positive
    /// quantity, or amounts that overflow.
    ///
    /// Always raised before the store is touched.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// A checkout line references a product that does not exist.
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: i64 },

    /// Stock is too low for a checkout line.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout [{P, 3}, {P, 3}]   (P has stock 5)
    ///      │
    ///      ▼
    /// line 1: stock 5 ≥ 3 → decrement → stock 2 (inside the scope)
    ///      │
    ///      ▼
    /// line 2: stock 2 < 3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: P, requested: 3, available: 2 }
    ///      │
    ///      ▼
    /// scope rolls back, P stays at 5
    /// ```
    #[error(
        "Insufficient stock for product {product_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Arithmetic on the field does not fit in the currency type.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Report window is reversed.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },
}

impl ValidationError {
    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 7,
            requested: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: available 2, requested 3"
        );

        let err = CoreError::ProductNotFound { product_id: 42 };
        assert_eq!(err.to_string(), "Product not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("items").to_string(), "items is required");

        let err = ValidationError::MustBePositive {
            field: "items[1].quantity".to_string(),
        };
        assert_eq!(err.to_string(), "items[1].quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_invalid_input() {
        let core_err: CoreError = ValidationError::required("items").into();
        assert!(matches!(core_err, CoreError::InvalidInput(_)));
        assert_eq!(core_err.to_string(), "Invalid input: items is required");
    }
}
