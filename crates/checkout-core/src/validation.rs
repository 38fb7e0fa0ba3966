//! # Validation Module
//!
//! Request validation for the checkout pipeline.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: request::parse_request (raw JSON only)                        │
//! │  ├── Document must be an object                                         │
//! │  ├── Same order as Layer 2, plus shape checks where they fall           │
//! │  └── Field types (integer price/qty, scalar user_id)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (every request, typed or parsed)                  │
//! │  ├── user_id present                                                    │
//! │  ├── items present and non-empty                                        │
//! │  └── each item: price & qty present, both > 0                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ValidatedCheckout ── no later stage re-checks presence                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::validate;
//! use checkout_core::{CheckoutRequest, LineItem};
//!
//! let request = CheckoutRequest::new("u-1", vec![LineItem::new(100, 2)]);
//! let checked = validate(&request).unwrap();
//! assert_eq!(checked.items.len(), 1);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CheckoutRequest, LineItem, UserId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validated View
// =============================================================================

/// A line that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub price: Money,
    pub qty: i64,
}

/// A request that passed [`validate`], borrowing from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheckout<'a> {
    pub user_id: &'a UserId,
    pub items: Vec<PricedLine>,
    pub coupon: Option<&'a str>,
    pub currency: Option<&'a str>,
}

// =============================================================================
// Request Validator
// =============================================================================

/// Validates a checkout request.
///
/// ## Rules (checked in this order)
/// 1. `user_id` present
/// 2. `items` present
/// 3. `items` not empty
/// 4. every item, in order: `price` and `qty` present, then `price > 0`,
///    then `qty > 0`
///
/// The first failing rule decides the error.
pub fn validate(request: &CheckoutRequest) -> ValidationResult<ValidatedCheckout<'_>> {
    let user_id = request
        .user_id
        .as_ref()
        .ok_or_else(|| ValidationError::required("user_id"))?;

    let items = request
        .items
        .as_deref()
        .ok_or_else(|| ValidationError::required("items"))?;

    if items.is_empty() {
        return Err(ValidationError::MustNotBeEmpty {
            field: "items".to_string(),
        });
    }

    let items = items
        .iter()
        .map(validate_item)
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(ValidatedCheckout {
        user_id,
        items,
        coupon: request.coupon.as_deref(),
        currency: request.currency.as_deref(),
    })
}

/// Validates a single line item.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_item;
/// use checkout_core::LineItem;
///
/// assert!(validate_item(&LineItem::new(1, 1)).is_ok());
/// assert!(validate_item(&LineItem::new(0, 1)).is_err());
/// assert!(validate_item(&LineItem { price: Some(5), qty: None }).is_err());
/// ```
pub fn validate_item(item: &LineItem) -> ValidationResult<PricedLine> {
    let (Some(price), Some(qty)) = (item.price, item.qty) else {
        return Err(ValidationError::MissingItemFields);
    };

    validate_price(price)?;
    validate_quantity(qty)?;

    Ok(PricedLine {
        price: Money::from_units(price),
        qty,
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (> 0). Free lines are not accepted.
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price <= 0 {
        return Err(ValidationError::must_be_positive("price"));
    }

    Ok(())
}

/// Validates a quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("qty"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
