//! # Money Module
//!
//! Provides the `Money` and `Rate` types used by every checkout stage.
//!
//! ## Integer Amounts, Truncated Percentages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AMOUNTS                                                                │
//! │    Every amount is an i64 in the smallest currency unit.                │
//! │    Sums and products of line items are exact.                           │
//! │                                                                         │
//! │  PERCENTAGES                                                            │
//! │    amount × rate is computed as a double and TRUNCATED:                 │
//! │      floor(160 × 0.21) = floor(33.6) = 33                               │
//! │    Below 2^53 this equals exact integer math. Above it, the double      │
//! │    product loses precision and the truncated value follows it.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::{Money, Rate};
//!
//! let subtotal = Money::from_units(200);
//! let discount = subtotal.floor_percentage(Rate::from_bps(2000)); // 20%
//! assert_eq!(discount.units(), 40);
//!
//! let taxable = (subtotal - discount).clamp_non_negative();
//! assert_eq!(taxable.floor_percentage(Rate::from_bps(2100)).units(), 33);
//! ```

use std::fmt;
use std::ops::Sub;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21%
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate as a fraction (2100 bps → 0.21).
    ///
    /// The division is correctly rounded, so this is the same double as the
    /// literal `0.21`.
    #[inline]
    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of whatever currency the checkout
/// resolved to.
///
/// ## Where Money is Used
/// ```text
/// LineItem.price × qty ──► subtotal ──► − discount ──► clamp ──► + tax ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from smallest-unit amount.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the amount in smallest units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let line = Money::from_units(100).checked_multiply_quantity(2);
    /// assert_eq!(line, Some(Money::from_units(200)));
    /// assert_eq!(Money::from_units(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Returns zero for negative amounts, otherwise the amount unchanged.
    ///
    /// Applied to `subtotal - discount` so a discount larger than the
    /// subtotal never yields a negative taxable amount.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Multiplies by `rate` as a double and truncates toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::{Money, Rate};
    ///
    /// // 150 × 5% = 7.5 → 7
    /// let discount = Money::from_units(150).floor_percentage(Rate::from_bps(500));
    /// assert_eq!(discount.units(), 7);
    /// ```
    pub fn floor_percentage(&self, rate: Rate) -> Money {
        // `as` saturates on out-of-range doubles instead of wrapping.
        Money((self.0 as f64 * rate.as_fraction()).trunc() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subtraction may go negative (discount larger than subtotal); callers
/// clamp afterwards.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_fraction_matches_literal() {
        assert_eq!(Rate::from_bps(2100).as_fraction(), 0.21);
        assert_eq!(Rate::from_bps(1000).as_fraction(), 0.10);
        assert_eq!(Rate::from_bps(2000).as_fraction(), 0.20);
        assert_eq!(Rate::from_bps(500).as_fraction(), 0.05);
        assert_eq!(Rate::from_bps(2100).to_string(), "21%");
    }

    #[test]
    fn test_floor_percentage_truncates() {
        let rate = Rate::from_bps(2100);
        assert_eq!(Money::from_units(1).floor_percentage(rate).units(), 0);
        assert_eq!(Money::from_units(100).floor_percentage(rate).units(), 21);
        assert_eq!(Money::from_units(160).floor_percentage(rate).units(), 33);
        assert_eq!(Money::from_units(199).floor_percentage(Rate::from_bps(500)).units(), 9);
        assert_eq!(Money::zero().floor_percentage(rate).units(), 0);
    }

    #[test]
    fn test_floor_percentage_follows_double_above_2_pow_53() {
        // The double product differs from exact integer math here.
        let amount = Money::from_units(88_579_961_122_815_900);
        let exact = amount.units() as i128 * 2100 / 10_000;
        let floored = amount.floor_percentage(Rate::from_bps(2100)).units() as i128;
        assert_eq!(floored, (amount.units() as f64 * 0.21) as i128);
        assert_ne!(floored, exact);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_units(-5).clamp_non_negative(), Money::zero());
        assert_eq!(Money::zero().clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_units(7).clamp_non_negative().units(), 7);
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_units(299);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_units(897)));
        assert_eq!(price.checked_add(Money::from_units(1)), Some(Money::from_units(300)));
        assert_eq!(Money::from_units(i64::MAX).checked_add(Money::from_units(1)), None);
    }

    #[test]
    fn test_subtraction_may_go_negative() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((b - a).units(), -500);
        assert_eq!((b - a).clamp_non_negative(), Money::zero());
        assert_eq!(a.to_string(), "1000");
    }
}
