//! # Checkout Math
//!
//! Derived order arithmetic over the cart subtotal: shipping, promo
//! discount, tax, grand total. Consumers of the cart store use this to
//! render the order summary; nothing here mutates cart state.
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal  = Σ price × quantity            (from the cart)              │
//! │  shipping  = $0.00  if subtotal > $50.00   (strict >, not >=)           │
//! │              $5.99  otherwise                                           │
//! │  discount  = subtotal × 10%  if promo applied, else $0.00               │
//! │  tax       = (subtotal − discount) × 8%                                 │
//! │  total     = subtotal + shipping − discount + tax                       │
//! │                                                                         │
//! │  Example: $45.00 cart with FRESH10                                      │
//! │    shipping $5.99, discount $4.50, tax $3.24 → total $49.73             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic runs in full decimal precision; rounding to two decimal
//! places is the display layer's job (`Money::Display` / `Money::rounded`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Promo Code
// =============================================================================

/// The single accepted promo code, stored lower-cased.
///
/// A placeholder policy: no expiry, no usage limit, no per-user tracking.
pub const PROMO_CODE: &str = "fresh10";

/// Checks a user-entered promo code, case-insensitively.
///
/// ## Example
/// ```rust
/// use harvest_core::checkout::is_valid_promo;
///
/// assert!(is_valid_promo("FRESH10"));
/// assert!(is_valid_promo("fresh10"));
/// assert!(!is_valid_promo("stale20"));
/// ```
pub fn is_valid_promo(code: &str) -> bool {
    code.to_lowercase() == PROMO_CODE
}

// =============================================================================
// Rates & Thresholds
// =============================================================================

/// Orders strictly above this subtotal ship free.
pub fn free_shipping_threshold() -> Money {
    Money::from_major_minor(50, 0)
}

/// Flat shipping fee below the free-shipping threshold.
pub fn flat_shipping_fee() -> Money {
    Money::from_major_minor(5, 99)
}

/// Promo discount rate: 10% off the subtotal.
pub fn promo_discount_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Tax rate: 8%, applied to the discounted subtotal.
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

// =============================================================================
// Order Summary
// =============================================================================

/// The derived checkout values for a given subtotal.
///
/// Pure function of `(subtotal, promo_applied)`; recompute after every
/// cart change rather than caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Computes the order summary from a cart subtotal.
    pub fn compute(subtotal: Money, promo_applied: bool) -> Self {
        let shipping = if subtotal > free_shipping_threshold() {
            Money::zero()
        } else {
            flat_shipping_fee()
        };

        let discount = if promo_applied {
            subtotal.apply_rate(promo_discount_rate())
        } else {
            Money::zero()
        };

        let tax = (subtotal - discount).apply_rate(tax_rate());
        let total = subtotal + shipping - discount + tax;

        OrderSummary {
            subtotal,
            shipping,
            discount,
            tax,
            total,
        }
    }

    /// True when the order ships free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more the shopper must add for free shipping.
    ///
    /// `None` once the order already ships free. The cart page renders
    /// this as "Add $X more for free shipping!".
    pub fn remaining_for_free_shipping(&self) -> Option<Money> {
        if self.has_free_shipping() {
            None
        } else {
            Some(free_shipping_threshold() - self.subtotal)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promo_is_case_insensitive() {
        assert!(is_valid_promo("fresh10"));
        assert!(is_valid_promo("FRESH10"));
        assert!(is_valid_promo("FrEsH10"));
        assert!(!is_valid_promo("  fresh10  ")); // exact match, no trimming
        assert!(!is_valid_promo("fresh10 "));
        assert!(!is_valid_promo(""));
        assert!(!is_valid_promo("fresh"));
        assert!(!is_valid_promo("fresh100"));
    }

    #[test]
    fn test_worked_example_with_promo() {
        // $45.00 subtotal, FRESH10 applied:
        //   shipping $5.99, discount $4.50, tax (45 − 4.50) × 0.08 = $3.24,
        //   total 45.00 + 5.99 − 4.50 + 3.24 = $49.73
        let summary = OrderSummary::compute(Money::from_major_minor(45, 0), true);

        assert_eq!(summary.shipping, Money::from_major_minor(5, 99));
        assert_eq!(summary.discount, Money::from_major_minor(4, 50));
        assert_eq!(summary.tax, Money::from_major_minor(3, 24));
        assert_eq!(summary.total, Money::from_major_minor(49, 73));
    }

    #[test]
    fn test_no_promo_means_no_discount() {
        let summary = OrderSummary::compute(Money::from_major_minor(45, 0), false);

        assert!(summary.discount.is_zero());
        assert_eq!(summary.tax, Money::from_major_minor(3, 60)); // 45 × 0.08
        // 45.00 + 5.99 + 3.60
        assert_eq!(summary.total, Money::from_major_minor(54, 59));
    }

    #[test]
    fn test_free_shipping_boundary_is_strict() {
        // Exactly $50.00 still pays shipping (strict >, not >=)
        let at_threshold = OrderSummary::compute(Money::from_major_minor(50, 0), false);
        assert_eq!(at_threshold.shipping, Money::from_major_minor(5, 99));
        assert!(!at_threshold.has_free_shipping());

        // $50.01 ships free
        let above = OrderSummary::compute(Money::from_major_minor(50, 1), false);
        assert!(above.shipping.is_zero());
        assert!(above.has_free_shipping());
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let summary = OrderSummary::compute(Money::from_major_minor(45, 0), false);
        assert_eq!(
            summary.remaining_for_free_shipping(),
            Some(Money::from_major_minor(5, 0))
        );

        let free = OrderSummary::compute(Money::from_major_minor(60, 0), false);
        assert_eq!(free.remaining_for_free_shipping(), None);
    }

    #[test]
    fn test_zero_subtotal() {
        let summary = OrderSummary::compute(Money::zero(), false);
        assert!(summary.discount.is_zero());
        assert!(summary.tax.is_zero());
        assert_eq!(summary.total, flat_shipping_fee());
    }
}
