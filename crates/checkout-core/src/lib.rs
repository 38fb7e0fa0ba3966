//! # checkout-core: Pure Checkout Pricing
//!
//! Computes the price breakdown of a cart checkout: subtotal, coupon
//! discount, tax, total and an order id. Every function is pure, and the
//! crate has no I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │        Host (checkout-cli, or any service wrapping the crate)   │    │
//! │  │    reads request ──► process_checkout ──► writes result/error   │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │    │
//! │  │                                                                 │    │
//! │  │ ┌──────────┐┌──────────┐┌──────────┐┌──────────┐┌──────────┐    │    │
//! │  │ │ request  ││validation││ checkout ││  coupon  ││  money   │    │    │
//! │  │ │   JSON   ││  rules   ││ pipeline ││  rules   ││Money/Rate│    │    │
//! │  │ └──────────┘└──────────┘└──────────┘└──────────┘└──────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO STATE • PURE FUNCTIONS                            │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Request/result wire types
//! - [`request`] - Raw JSON → typed request
//! - [`validation`] - Request validation rules
//! - [`coupon`] - Recognized coupons and their discounts
//! - [`money`] - Integer money and basis-point rates
//! - [`checkout`] - The pipeline stages and entry points
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **Integer Money**: amounts are i64 in the smallest currency unit
//! 3. **Truncated Percentages**: discounts and tax floor after multiplying
//! 4. **Explicit Errors**: `InvalidRequest` or `UnknownCoupon`, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{process_checkout, CheckoutRequest, LineItem};
//!
//! let request = CheckoutRequest::new("u-1", vec![LineItem::new(150, 1)]).with_coupon("VIP");
//! let result = process_checkout(&request).unwrap();
//!
//! // 150 ≥ 100 → VIP takes 50; tax = floor(100 × 21%) = 21
//! assert_eq!((result.discount, result.tax, result.total), (50, 21, 121));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{process_checkout, process_checkout_json};
pub use coupon::Coupon;
pub use error::{CheckoutError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when the request names none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Tax applied to the post-discount amount (21%).
pub const TAX_RATE: Rate = Rate::from_bps(2100);

/// `SAVE10` rate (10%).
pub const SAVE10_RATE: Rate = Rate::from_bps(1000);

/// `SAVE20` rate at or above [`SAVE20_THRESHOLD`] (20%).
pub const SAVE20_RATE_HIGH: Rate = Rate::from_bps(2000);

/// `SAVE20` rate below [`SAVE20_THRESHOLD`] (5%).
pub const SAVE20_RATE_LOW: Rate = Rate::from_bps(500);

pub const SAVE20_THRESHOLD: Money = Money::from_units(200);

/// `VIP` discount at or above [`VIP_THRESHOLD`].
pub const VIP_DISCOUNT_HIGH: Money = Money::from_units(50);

/// `VIP` discount below [`VIP_THRESHOLD`].
pub const VIP_DISCOUNT_LOW: Money = Money::from_units(10);

pub const VIP_THRESHOLD: Money = Money::from_units(100);

/// Last segment of every order id.
pub const ORDER_SUFFIX: &str = "X";
