//! # Domain Types
//!
//! Request and result types that cross the checkout boundary.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │ CheckoutRequest │   │    LineItem     │   │ CheckoutResult  │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  user_id?       │──►│  price?         │   │  order_id       │        │
//! │  │  items?         │   │  qty?           │   │  user_id        │        │
//! │  │  coupon?        │   └─────────────────┘   │  currency       │        │
//! │  │  currency?      │                         │  subtotal       │        │
//! │  └─────────────────┘                         │  discount       │        │
//! │                                              │  tax, total     │        │
//! │  ┌─────────────────┐                         │  items_count    │        │
//! │  │     UserId      │                         └─────────────────┘        │
//! │  │ Number|Text|Bool│                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Presence Is Optional, Not Sentinel
//! Every request field is an `Option`. A field the caller omitted is `None`,
//! and [`crate::validation::validate`] turns that into an `InvalidRequest`.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// User Id
// =============================================================================

/// Caller-defined buyer identifier.
///
/// The checkout never interprets it. It is echoed back and formatted into
/// the order id. On the wire it is any JSON string, number or boolean.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum UserId {
    #[ts(type = "number")]
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
            UserId::Bool(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id.into())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Text(id)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart line: a unit price and a quantity.
///
/// Both fields are optional so a line missing either can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Unit price in the smallest currency unit. Must be > 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub price: Option<i64>,

    /// Quantity. Must be > 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub qty: Option<i64>,
}

impl LineItem {
    /// A line with both fields present.
    pub const fn new(price: i64, qty: i64) -> Self {
        LineItem {
            price: Some(price),
            qty: Some(qty),
        }
    }
}

// =============================================================================
// Checkout Request
// =============================================================================

/// Input to [`crate::checkout::process_checkout`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub user_id: Option<UserId>,

    /// Cart lines in caller order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub items: Option<Vec<LineItem>>,

    /// `SAVE10`, `SAVE20`, `VIP`, empty, or absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub coupon: Option<String>,

    /// ISO-style currency code. Absent resolves to [`crate::DEFAULT_CURRENCY`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub currency: Option<String>,
}

impl CheckoutRequest {
    /// Creates a request with the two required fields set.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{CheckoutRequest, LineItem};
    ///
    /// let request = CheckoutRequest::new("u-42", vec![LineItem::new(100, 2)])
    ///     .with_coupon("SAVE20");
    /// assert_eq!(request.coupon.as_deref(), Some("SAVE20"));
    /// assert!(request.currency.is_none());
    /// ```
    pub fn new(user_id: impl Into<UserId>, items: Vec<LineItem>) -> Self {
        CheckoutRequest {
            user_id: Some(user_id.into()),
            items: Some(items),
            coupon: None,
            currency: None,
        }
    }

    pub fn with_coupon(mut self, coupon: impl Into<String>) -> Self {
        self.coupon = Some(coupon.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

// =============================================================================
// Checkout Result
// =============================================================================

/// The final price breakdown.
///
/// ## Invariants
/// - `total == max(subtotal - discount, 0) + tax`
/// - `tax == floor(max(subtotal - discount, 0) × 21%)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutResult {
    /// `"{user_id}-{items_count}-X"`. Deterministic, not unique.
    pub order_id: String,
    pub user_id: UserId,
    /// Resolved currency code.
    pub currency: String,
    pub subtotal: i64,
    /// Coupon discount as computed, before clamping.
    pub discount: i64,
    pub tax: i64,
    pub total: i64,
    /// Number of lines (not the sum of quantities).
    pub items_count: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::from(42).to_string(), "42");
        assert_eq!(UserId::from("alice").to_string(), "alice");
    }

    #[test]
    fn test_user_id_untagged_serde() {
        let id: UserId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(id, UserId::from(7));

        let id: UserId = serde_json::from_value(json!("u-7")).unwrap();
        assert_eq!(id, UserId::Text("u-7".to_string()));

        let id: UserId = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(id.to_string(), "1.5");

        let id: UserId = serde_json::from_value(json!(u64::MAX)).unwrap();
        assert_eq!(id.to_string(), "18446744073709551615");

        let id: UserId = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(id, UserId::Bool(false));

        assert!(serde_json::from_value::<UserId>(json!([1])).is_err());
        assert_eq!(serde_json::to_value(UserId::from(7)).unwrap(), json!(7));
        assert_eq!(serde_json::to_value(UserId::Bool(true)).unwrap(), json!(true));
    }

    #[test]
    fn test_ts_bindings_mark_omittable_fields_optional() {
        let line = LineItem::decl();
        assert!(line.contains("price?: bigint"), "{line}");
        assert!(line.contains("qty?: bigint"), "{line}");

        let request = CheckoutRequest::decl();
        for field in ["user_id?: UserId", "items?: Array<LineItem>", "coupon?: string", "currency?: string"] {
            assert!(request.contains(field), "{field} missing from {request}");
        }

        assert!(UserId::decl().contains("number | string | boolean"));
    }

    #[test]
    fn test_request_missing_fields_are_none() {
        let request: CheckoutRequest =
            serde_json::from_value(json!({ "items": [{ "price": 5 }] })).unwrap();
        assert!(request.user_id.is_none());
        assert!(request.coupon.is_none());
        assert_eq!(
            request.items,
            Some(vec![LineItem {
                price: Some(5),
                qty: None
            }])
        );
    }

    #[test]
    fn test_result_field_names() {
        let result = CheckoutResult {
            order_id: "u-1-X".to_string(),
            user_id: UserId::from("u"),
            currency: "USD".to_string(),
            subtotal: 1,
            discount: 0,
            tax: 0,
            total: 1,
            items_count: 1,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "order_id": "u-1-X",
                "user_id": "u",
                "currency": "USD",
                "subtotal": 1,
                "discount": 0,
                "tax": 0,
                "total": 1,
                "items_count": 1
            })
        );
    }
}
