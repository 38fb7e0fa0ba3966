//! # Checkout Pipeline
//!
//! Computes the price breakdown for one checkout.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  (raw JSON) ──► parse_request ─┐                                        │
//! │                                ▼                                        │
//! │  CheckoutRequest ──► validate ──► normalize_currency                    │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                 calc_subtotal ──► calc_discount ──► clamp_non_negative  │
//! │                                                          │              │
//! │                                                          ▼              │
//! │       build_response ◄── generate_order_id ◄── calc_tax, total          │
//! │                                                                         │
//! │  Any error aborts the whole pipeline; nothing partial is returned.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use checkout_core::{process_checkout, CheckoutRequest, LineItem};
//!
//! let request = CheckoutRequest::new("u-42", vec![LineItem::new(100, 2)])
//!     .with_coupon("SAVE20");
//! let result = process_checkout(&request).unwrap();
//!
//! assert_eq!(result.subtotal, 200);
//! assert_eq!(result.discount, 40);
//! assert_eq!(result.tax, 33);
//! assert_eq!(result.total, 193);
//! assert_eq!(result.currency, "USD");
//! assert_eq!(result.order_id, "u-42-1-X");
//! ```

use serde_json::Value;
use tracing::{debug, debug_span, info, warn};

use crate::coupon::Coupon;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::request::parse_request;
use crate::types::{CheckoutRequest, CheckoutResult, UserId};
use crate::validation::{validate, PricedLine, ValidationResult};
use crate::{DEFAULT_CURRENCY, ORDER_SUFFIX, TAX_RATE};

// =============================================================================
// Stages
// =============================================================================

/// Returns the currency unchanged, or [`DEFAULT_CURRENCY`] when absent.
///
/// An empty string is a present value and is kept as is.
pub fn normalize_currency(currency: Option<&str>) -> String {
    currency.unwrap_or(DEFAULT_CURRENCY).to_string()
}

/// Sums `price × qty` over every line.
///
/// Fails only if the sum does not fit in an `i64`.
pub fn calc_subtotal(items: &[PricedLine]) -> ValidationResult<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |acc, line| {
            line.price
                .checked_multiply_quantity(line.qty)
                .and_then(|line_total| acc.checked_add(line_total))
        })
        .ok_or_else(|| out_of_range("subtotal"))
}

/// The discount `coupon` grants on `subtotal`.
///
/// Absent or empty coupons give zero. Unrecognized codes fail with
/// `UnknownCoupon`.
///
/// ## Example
/// ```rust
/// use checkout_core::checkout::calc_discount;
/// use checkout_core::Money;
///
/// assert_eq!(calc_discount(Money::from_units(150), Some("VIP")).unwrap().units(), 50);
/// assert_eq!(calc_discount(Money::from_units(150), None).unwrap().units(), 0);
/// assert!(calc_discount(Money::from_units(150), Some("BADCODE")).is_err());
/// ```
pub fn calc_discount(subtotal: Money, coupon: Option<&str>) -> CoreResult<Money> {
    Ok(Coupon::resolve(coupon)?
        .map(|coupon| coupon.discount(subtotal))
        .unwrap_or_else(Money::zero))
}

/// Zero for negative amounts, otherwise unchanged.
#[inline]
pub fn clamp_non_negative(value: Money) -> Money {
    value.clamp_non_negative()
}

/// `floor(amount × 21%)`.
#[inline]
pub fn calc_tax(amount: Money) -> Money {
    amount.floor_percentage(TAX_RATE)
}

/// `"{user_id}-{items_count}-X"`.
///
/// Two requests with the same user id and line count get the same id.
pub fn generate_order_id(user_id: &UserId, items_count: usize) -> String {
    format!("{}-{}-{}", user_id, items_count, ORDER_SUFFIX)
}

/// The computed amounts of one checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

/// Assembles the result record.
pub fn build_response(
    order_id: String,
    user_id: UserId,
    currency: String,
    breakdown: Breakdown,
    items_count: usize,
) -> CheckoutResult {
    CheckoutResult {
        order_id,
        user_id,
        currency,
        subtotal: breakdown.subtotal.units(),
        discount: breakdown.discount.units(),
        tax: breakdown.tax.units(),
        total: breakdown.total.units(),
        items_count,
    }
}

fn out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX,
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Runs the full checkout pipeline on a typed request.
pub fn process_checkout(request: &CheckoutRequest) -> CoreResult<CheckoutResult> {
    let span = debug_span!("checkout", user_id = ?request.user_id);
    let _guard = span.enter();

    let result = run(request);
    if let Err(err) = &result {
        warn!(error = %err, "checkout rejected");
    }
    result
}

/// Parses a raw JSON request, then runs [`process_checkout`].
///
/// Shape errors in the JSON are reported at the point the fixed check
/// order reaches them, so `{"items": "x"}` fails on the missing user id.
pub fn process_checkout_json(raw: &Value) -> CoreResult<CheckoutResult> {
    let request = parse_request(raw).map_err(|err| {
        warn!(error = %err, "checkout request could not be parsed");
        err
    })?;
    process_checkout(&request)
}

fn run(request: &CheckoutRequest) -> CoreResult<CheckoutResult> {
    let checked = validate(request)?;
    let items_count = checked.items.len();

    let currency = normalize_currency(checked.currency);
    let subtotal = calc_subtotal(&checked.items)?;
    let discount = calc_discount(subtotal, checked.coupon)?;
    debug!(%currency, %subtotal, %discount, coupon = ?checked.coupon, "discount applied");

    let total_after_discount = clamp_non_negative(subtotal - discount);
    let tax = calc_tax(total_after_discount);
    let total = total_after_discount
        .checked_add(tax)
        .ok_or_else(|| out_of_range("total"))?;
    debug!(%total_after_discount, tax_rate = %TAX_RATE, %tax, %total, "tax applied");

    let order_id = generate_order_id(checked.user_id, items_count);

    info!(
        order_id = %order_id,
        subtotal = %subtotal,
        discount = %discount,
        tax = %tax,
        total = %total,
        items_count,
        "Checkout priced"
    );

    Ok(build_response(
        order_id,
        checked.user_id.clone(),
        currency,
        Breakdown {
            subtotal,
            discount,
            tax,
            total,
        },
        items_count,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::types::LineItem;
    use proptest::prelude::*;

    fn coupon_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("SAVE10".to_string())),
            Just(Some("SAVE20".to_string())),
            Just(Some("VIP".to_string())),
        ]
    }

    fn request_strategy() -> impl Strategy<Value = CheckoutRequest> {
        (
            any::<i64>(),
            prop::collection::vec((1i64..=100_000, 1i64..=1_000), 1..=20),
            coupon_strategy(),
        )
            .prop_map(|(user, lines, coupon)| CheckoutRequest {
                coupon,
                ..CheckoutRequest::new(
                    user,
                    lines.into_iter().map(|(p, q)| LineItem::new(p, q)).collect(),
                )
            })
    }

    proptest! {
        /// total = max(subtotal - discount, 0) + tax, tax = floor(clamped × 0.21)
        #[test]
        fn prop_totals_invariant(request in request_strategy()) {
            let r = process_checkout(&request).unwrap();
            let clamped = (r.subtotal - r.discount).max(0);
            prop_assert_eq!(r.tax, clamped * 21 / 100);
            prop_assert_eq!(r.total, clamped + r.tax);
            prop_assert!(r.discount >= 0);
            prop_assert!(r.total >= 0);
        }

        /// Same input, same output.
        #[test]
        fn prop_idempotent(request in request_strategy()) {
            prop_assert_eq!(process_checkout(&request), process_checkout(&request));
        }

        #[test]
        fn prop_subtotal_is_sum_of_lines(request in request_strategy()) {
            let expected: i64 = request
                .items
                .iter()
                .flatten()
                .map(|l| l.price.unwrap_or(0) * l.qty.unwrap_or(0))
                .sum();
            prop_assert_eq!(process_checkout(&request).unwrap().subtotal, expected);
        }

        /// Within a tier, a larger subtotal never yields a smaller discount.
        #[test]
        fn prop_discount_monotonic_within_tier(a in 1i64..1_000_000, b in 1i64..1_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let same_save20_tier = (lo >= 200) == (hi >= 200);
            let same_vip_tier = (lo >= 100) == (hi >= 100);

            let d = |s: i64, c: &str| calc_discount(Money::from_units(s), Some(c)).unwrap();

            prop_assert!(d(lo, "SAVE10") <= d(hi, "SAVE10"));
            if same_save20_tier {
                prop_assert!(d(lo, "SAVE20") <= d(hi, "SAVE20"));
            }
            if same_vip_tier {
                prop_assert_eq!(d(lo, "VIP"), d(hi, "VIP"));
            }
        }
    }
}
