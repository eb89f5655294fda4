//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Suggested price 12.50 → 1250 cents                                   │
//! │    Cart total = Σ unit_price_cents × quantity (exact)                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mtc_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let doubled = price.multiply_quantity(2);
//! assert_eq!(doubled.cents(), 2198);
//! assert_eq!(price.major(), 10);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

/// Cents per major currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative amounts are representable and rejected by
///   validation where they make no sense
/// - **Saturating arithmetic**: line totals and sums clamp at `i64::MAX`
/// - **Single field tuple struct**: serializes as a bare integer
///
/// ## Where Money is Used
/// ```text
/// Product.suggested_price ──► CartLineView.unit_price ──► CartLineView.line_total
///                                                              │
/// Product.cost_price ──► price_code::encode_money              ▼
///                                                         CartView.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use mtc_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a whole number of major units.
    ///
    /// Returns `None` when the amount does not fit in cents.
    ///
    /// ## Example
    /// ```rust
    /// use mtc_core::money::Money;
    ///
    /// assert_eq!(Money::checked_from_major(23).unwrap().cents(), 2300);
    /// assert!(Money::checked_from_major(u64::MAX).is_none());
    /// ```
    pub fn checked_from_major(units: u64) -> Option<Self> {
        i64::try_from(units)
            .ok()
            .and_then(|u| u.checked_mul(CENTS_PER_UNIT))
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole major units, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use mtc_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// Prices and quantities are validated separately, so their product can
    /// still exceed `i64`. Cart reads must not fail on that.
    ///
    /// ## Example
    /// ```rust
    /// use mtc_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering with two decimals; clients format for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating, like [`Money::multiply_quantity`].
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
