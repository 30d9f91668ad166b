//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! Prices are whole currency units (rupiah has no minor unit in practice),
//! so every amount is an `i64`. Floating point never enters a total.
//!
//! The only operations checkout needs are `price × quantity` and summing line
//! subtotals. Both are checked: an overflow is an input error, never a wrapped
//! total.
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::from_units(1000);
//! let line = price.line_total(3).unwrap();
//! assert_eq!(line.units(), 3000);
//!
//! let total = line.checked_add(Money::from_units(2000)).unwrap();
//! assert_eq!(total.to_string(), "Rp5.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Unit price × quantity, `None` on overflow.
    ///
    /// ```text
    /// unit price 1000 × qty 2  →  2000
    /// unit price i64::MAX × 2  →  None
    /// ```
    #[inline]
    pub fn line_total(&self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

/// Formats as rupiah with dot thousand separators, e.g. `Rp12.500`.
///
/// Used in log lines; clients format amounts themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp{}", sign, grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
