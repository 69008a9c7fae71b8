//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    40.50 × 0.08 = 3.2400000000000002 → displayed tax drifts            │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic in currency units.                          │
//! │    40.50 × 0.08 = 3.24 exactly.                                         │
//! │                                                                         │
//! │  Rounding to two decimal places happens ONLY at display time;           │
//! │  intermediate results keep full precision.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use harvest_core::money::Money;
//!
//! let price = Money::from_major_minor(10, 99); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                          // $21.98
//! let total = price + Money::from_major_minor(5, 0); // $15.99
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in decimal currency units (dollars).
///
/// ## Design Decisions
/// - **Decimal (base-10)**: exact currency arithmetic, no binary float drift
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Signed**: negative values represent discounts
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLineItem.price ──► line_total ──► Cart subtotal
///                                                              │
///        OrderSummary: shipping / discount / tax / total ◄─────┘
/// ```
/// Every monetary value in the system flows through this type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a raw decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use harvest_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// let discount = Money::from_major_minor(-5, 50); // -$5.50
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        let cents = if major < 0 {
            major * 100 - minor
        } else {
            major * 100 + minor
        };
        Money(Decimal::new(cents, 2))
    }

    /// Returns the raw decimal amount (full precision, unrounded).
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount rounded to two decimal places.
    ///
    /// Presentation-layer concern: checkout math keeps full precision and
    /// rounds only here, when a value is shown to the user.
    #[inline]
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp(2)
    }

    /// Zero money value.
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use harvest_core::money::Money;
    ///
    /// let unit_price = Money::from_major_minor(2, 99); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_major_minor(8, 97));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Applies a fractional rate and returns the resulting amount.
    ///
    /// Used for the promo discount (rate 0.10) and tax (rate 0.08).
    /// No intermediate rounding: the result keeps full precision.
    ///
    /// ## Example
    /// ```rust
    /// use harvest_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_major_minor(45, 0);
    /// let discount = subtotal.apply_rate(Decimal::new(10, 2)); // 10%
    /// assert_eq!(discount, Money::from_major_minor(4, 50));
    /// ```
    #[inline]
    pub fn apply_rate(&self, rate: Decimal) -> Self {
        Money(self.0 * rate)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money rounded to currency precision, e.g. `$10.99`.
///
/// This is the single place display rounding happens.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${:.2}", sign, self.0.abs())
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summation over iterators of Money (single-pass subtotals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
