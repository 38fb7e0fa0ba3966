//! # Coupons
//!
//! The recognized coupon codes and the discount each one grants.
//!
//! ## Discount Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Code     Rule                                                          │
//! │  ──────   ────────────────────────────────────────────────────────────  │
//! │  SAVE10   floor(subtotal × 10%)                                         │
//! │  SAVE20   floor(subtotal × 20%)  if subtotal ≥ 200                      │
//! │           floor(subtotal × 5%)   otherwise                              │
//! │  VIP      50                     if subtotal ≥ 100                      │
//! │           10                     otherwise                              │
//! │  "" / None 0                                                            │
//! │  other    UnknownCoupon                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{CheckoutError, CoreResult};
use crate::money::Money;
use crate::{
    SAVE10_RATE, SAVE20_RATE_HIGH, SAVE20_RATE_LOW, SAVE20_THRESHOLD, VIP_DISCOUNT_HIGH,
    VIP_DISCOUNT_LOW, VIP_THRESHOLD,
};

/// A recognized coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coupon {
    /// `SAVE10`: flat 10% off.
    Save10,
    /// `SAVE20`: 20% off at or above the threshold, 5% below it.
    Save20,
    /// `VIP`: fixed amount off, larger at or above the threshold.
    Vip,
}

impl Coupon {
    pub const ALL: [Coupon; 3] = [Coupon::Save10, Coupon::Save20, Coupon::Vip];

    /// The code a caller types.
    pub const fn code(&self) -> &'static str {
        match self {
            Coupon::Save10 => "SAVE10",
            Coupon::Save20 => "SAVE20",
            Coupon::Vip => "VIP",
        }
    }

    /// Resolves an optional coupon field.
    ///
    /// Absent and empty both mean "no coupon". Codes are case-sensitive.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::coupon::Coupon;
    ///
    /// assert_eq!(Coupon::resolve(None).unwrap(), None);
    /// assert_eq!(Coupon::resolve(Some("")).unwrap(), None);
    /// assert_eq!(Coupon::resolve(Some("VIP")).unwrap(), Some(Coupon::Vip));
    /// assert!(Coupon::resolve(Some("vip")).is_err());
    /// ```
    pub fn resolve(code: Option<&str>) -> CoreResult<Option<Coupon>> {
        match code {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }

    /// The discount this coupon grants on `subtotal`.
    pub fn discount(&self, subtotal: Money) -> Money {
        match self {
            Coupon::Save10 => subtotal.floor_percentage(SAVE10_RATE),
            Coupon::Save20 => {
                let rate = if subtotal >= SAVE20_THRESHOLD {
                    SAVE20_RATE_HIGH
                } else {
                    SAVE20_RATE_LOW
                };
                subtotal.floor_percentage(rate)
            }
            Coupon::Vip => {
                if subtotal < VIP_THRESHOLD {
                    VIP_DISCOUNT_LOW
                } else {
                    VIP_DISCOUNT_HIGH
                }
            }
        }
    }
}

impl FromStr for Coupon {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coupon::ALL
            .into_iter()
            .find(|coupon| coupon.code() == s)
            .ok_or_else(|| CheckoutError::unknown_coupon(s))
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
