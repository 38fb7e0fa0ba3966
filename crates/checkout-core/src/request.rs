//! # Request Parsing
//!
//! Turns a loosely-typed JSON document into a [`CheckoutRequest`].
//!
//! Callers with typed data build a `CheckoutRequest` directly and skip this
//! module. Callers holding JSON go through here so that shape problems
//! (`items` not a list, an item not an object, a price that is not an
//! integer) come back as `InvalidRequest` with a precise message instead of
//! a generic deserialization error.
//!
//! ## Check Order
//! Shape and value checks run in one pass, in the same order as
//! [`crate::validation::validate`]:
//! ```text
//! user_id present ─► items present ─► items is a list ─► items non-empty
//!                                                            │
//!    ┌───────────────────────────────────────────────────────┘
//!    ▼  for each item, in order
//! object with price & qty ─► price integer ─► price > 0 ─► qty integer ─► qty > 0
//! ```
//! A malformed later item never hides a bad value in an earlier one.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{CheckoutRequest, LineItem, UserId};
use crate::validation::{validate_price, validate_quantity, ValidationResult};

/// Parses and checks a JSON value.
///
/// `null` counts as absent for every field. A request returned from here
/// always passes [`crate::validation::validate`].
///
/// ## Example
/// ```rust
/// use checkout_core::request::parse_request;
/// use serde_json::json;
///
/// let request = parse_request(&json!({
///     "user_id": 7,
///     "items": [{ "price": 100, "qty": 2 }],
///     "coupon": "SAVE20"
/// }))
/// .unwrap();
/// assert_eq!(request.coupon.as_deref(), Some("SAVE20"));
///
/// let err = parse_request(&json!({ "user_id": 7, "items": "nope" })).unwrap_err();
/// assert_eq!(err.to_string(), "items must be a list");
///
/// let err = parse_request(&json!({ "items": "nope" })).unwrap_err();
/// assert_eq!(err.to_string(), "user_id is required");
/// ```
pub fn parse_request(raw: &Value) -> ValidationResult<CheckoutRequest> {
    let fields = raw
        .as_object()
        .ok_or_else(|| ValidationError::invalid_format("request", "must be a JSON object"))?;

    let user_id = parse_user_id(fields)?;
    let items = parse_items(fields)?;

    Ok(CheckoutRequest {
        user_id: Some(user_id),
        items: Some(items),
        coupon: parse_coupon(fields),
        currency: optional_string(fields, "currency")?,
    })
}

impl CheckoutRequest {
    /// Parses JSON text into a request.
    pub fn from_json_str(text: &str) -> ValidationResult<Self> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| ValidationError::invalid_format("request", e.to_string()))?;
        parse_request(&raw)
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn parse_user_id(fields: &Map<String, Value>) -> ValidationResult<UserId> {
    match present(fields, "user_id") {
        None => Err(ValidationError::required("user_id")),
        Some(Value::String(s)) => Ok(UserId::Text(s.clone())),
        Some(Value::Number(n)) => Ok(UserId::Number(n.clone())),
        Some(Value::Bool(b)) => Ok(UserId::Bool(*b)),
        Some(_) => Err(ValidationError::invalid_format(
            "user_id",
            "must be a string, number or boolean",
        )),
    }
}

fn parse_items(fields: &Map<String, Value>) -> ValidationResult<Vec<LineItem>> {
    let items = present(fields, "items")
        .ok_or_else(|| ValidationError::required("items"))?
        .as_array()
        .ok_or_else(|| ValidationError::NotAList {
            field: "items".to_string(),
        })?;

    if items.is_empty() {
        return Err(ValidationError::MustNotBeEmpty {
            field: "items".to_string(),
        });
    }

    items.iter().map(parse_item).collect()
}

fn parse_item(item: &Value) -> ValidationResult<LineItem> {
    let fields = item.as_object().ok_or(ValidationError::MissingItemFields)?;
    let (Some(price), Some(qty)) = (present(fields, "price"), present(fields, "qty")) else {
        return Err(ValidationError::MissingItemFields);
    };

    let price = integer(price, "price")?;
    validate_price(price)?;
    let qty = integer(qty, "qty")?;
    validate_quantity(qty)?;

    Ok(LineItem::new(price, qty))
}

fn integer(value: &Value, key: &str) -> ValidationResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| ValidationError::invalid_format(key, "must be an integer"))
}

/// Non-string coupons keep their JSON text so they fail as unknown codes.
fn parse_coupon(fields: &Map<String, Value>) -> Option<String> {
    match present(fields, "coupon")? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> ValidationResult<Option<String>> {
    match present(fields, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::invalid_format(key, "must be a string")),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(raw: Value) -> String {
        parse_request(&raw).unwrap_err().to_string()
    }

    #[test]
    fn test_parse_full_request() {
        let request = parse_request(&json!({
            "user_id": "alice",
            "items": [{ "price": 100, "qty": 2 }, { "price": 5, "qty": 1 }],
            "coupon": "VIP",
            "currency": "EUR"
        }))
        .unwrap();

        assert_eq!(
            request,
            CheckoutRequest::new("alice", vec![LineItem::new(100, 2), LineItem::new(5, 1)])
                .with_coupon("VIP")
                .with_currency("EUR")
        );
    }

    #[test]
    fn test_null_optional_fields_are_absent() {
        let request = parse_request(&json!({
            "user_id": 1,
            "items": [{ "price": 3, "qty": 1 }],
            "coupon": null,
            "currency": null
        }))
        .unwrap();
        assert_eq!(request.coupon, None);
        assert_eq!(request.currency, None);
    }

    #[test]
    fn test_presence_checked_before_shape() {
        assert_eq!(message(json!({ "items": "x" })), "user_id is required");
        assert_eq!(message(json!({ "user_id": null, "items": [[1]] })), "user_id is required");
        assert_eq!(message(json!({ "user_id": 1 })), "items is required");
        assert_eq!(message(json!({ "user_id": 1, "items": null })), "items is required");
    }

    #[test]
    fn test_items_must_be_a_list() {
        for items in [json!("x"), json!({ "price": 1, "qty": 1 }), json!(3)] {
            assert_eq!(message(json!({ "user_id": 1, "items": items })), "items must be a list");
        }
        assert_eq!(message(json!({ "user_id": 1, "items": [] })), "items must not be empty");
    }

    #[test]
    fn test_item_must_be_an_object_with_both_fields() {
        let err = parse_request(&json!({ "user_id": 1, "items": [[100, 2]] })).unwrap_err();
        assert_eq!(err, ValidationError::MissingItemFields);

        for item in [json!({ "price": 3 }), json!({ "qty": 1, "price": null }), json!({})] {
            let err = parse_request(&json!({ "user_id": 1, "items": [item] })).unwrap_err();
            assert_eq!(err, ValidationError::MissingItemFields);
        }
    }

    #[test]
    fn test_earlier_item_value_wins_over_later_shape() {
        let raw = json!({ "user_id": 1, "items": [{ "price": 0, "qty": 1 }, [100, 2]] });
        assert_eq!(message(raw), "price must be positive");

        let raw = json!({ "user_id": 1, "items": [{ "price": 5, "qty": -1 }, { "price": "x" }] });
        assert_eq!(message(raw), "qty must be positive");
    }

    #[test]
    fn test_price_checked_before_qty_within_item() {
        let raw = json!({ "user_id": 1, "items": [{ "price": 0, "qty": "2" }] });
        assert_eq!(message(raw), "price must be positive");

        let raw = json!({ "user_id": 1, "items": [{ "price": "100", "qty": 0 }] });
        assert_eq!(message(raw), "price has invalid format: must be an integer");

        let raw = json!({ "user_id": 1, "items": [{ "price": 1, "qty": 1.5 }] });
        assert_eq!(message(raw), "qty has invalid format: must be an integer");
    }

    #[test]
    fn test_user_id_accepts_any_scalar() {
        let items = json!([{ "price": 1, "qty": 1 }]);
        for (raw, shown) in [
            (json!(1.5), "1.5"),
            (json!(18446744073709551615u64), "18446744073709551615"),
            (json!(true), "true"),
            (json!(""), ""),
        ] {
            let request = parse_request(&json!({ "user_id": raw, "items": items })).unwrap();
            assert_eq!(request.user_id.unwrap().to_string(), shown);
        }

        let err = message(json!({ "user_id": [1], "items": items }));
        assert!(err.starts_with("user_id has invalid format"));
    }

    #[test]
    fn test_non_string_coupon_keeps_json_text() {
        let items = json!([{ "price": 1, "qty": 1 }]);
        let request = parse_request(&json!({ "user_id": 1, "items": items, "coupon": 5 })).unwrap();
        assert_eq!(request.coupon.as_deref(), Some("5"));

        let err = message(json!({ "user_id": 1, "items": items, "currency": 840 }));
        assert_eq!(err, "currency has invalid format: must be a string");
    }

    #[test]
    fn test_request_must_be_object() {
        let err = parse_request(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "request"));
    }

    #[test]
    fn test_from_json_str() {
        let request =
            CheckoutRequest::from_json_str(r#"{"user_id": 9, "items": [{"price": 1, "qty": 1}]}"#)
                .unwrap();
        assert_eq!(request.user_id, Some(UserId::from(9)));

        assert!(CheckoutRequest::from_json_str("{not json").is_err());
    }
}
