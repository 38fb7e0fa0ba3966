//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                       │
//! │  ├── CheckoutError    - What a checkout call returns                    │
//! │  │   ├── InvalidRequest(ValidationError)                                │
//! │  │   └── UnknownCoupon { code }                                         │
//! │  └── ValidationError  - Request shape / field failures                  │
//! │                                                                         │
//! │  checkout-cli errors (separate crate)                                   │
//! │  └── ApiError         - What the caller sees (serialized)               │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → ApiError → Caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Messages are the exact text a caller shows ("price must be positive")
//! 3. Errors are enum variants, never String
//! 4. Any failure aborts the whole checkout; there are no partial results

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors returned by the checkout pipeline.
///
/// Both kinds are final at this layer. The pipeline never retries and
/// never returns a partial breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The request is missing a field or carries a malformed one.
    ///
    /// ## When This Occurs
    /// - `user_id` or `items` is absent
    /// - `items` is empty or not a list
    /// - An item lacks `price`/`qty`, or either is not positive
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// A non-empty coupon code outside the recognized set.
    ///
    /// ## User Workflow
    /// ```text
    /// Enter coupon: "BADCODE"
    ///      │
    ///      ▼
    /// calc_discount(subtotal, "BADCODE")
    ///      │
    ///      ▼
    /// UnknownCoupon { code: "BADCODE" }
    ///      │
    ///      ▼
    /// UI shows: "unknown coupon"
    /// ```
    #[error("unknown coupon: {code}")]
    UnknownCoupon { code: String },
}

impl CheckoutError {
    /// Shorthand for an unknown coupon error.
    pub fn unknown_coupon(code: impl Into<String>) -> Self {
        CheckoutError::UnknownCoupon { code: code.into() }
    }

    /// Returns the validation failure, if this is an invalid request.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            CheckoutError::InvalidRequest(err) => Some(err),
            CheckoutError::UnknownCoupon { .. } => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while parsing or validating a request, before any arithmetic
/// runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// A sequence field was present but held something else.
    #[error("{field} must be a list")]
    NotAList { field: String },

    /// A sequence field was present but empty.
    #[error("{field} must not be empty")]
    MustNotBeEmpty { field: String },

    /// A line item lacks `price` or `qty`.
    #[error("item must have price and qty")]
    MissingItemFields,

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (wrong JSON type, unparseable document).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CoreResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("user_id").to_string(),
            "user_id is required"
        );
        assert_eq!(
            ValidationError::MustNotBeEmpty {
                field: "items".to_string()
            }
            .to_string(),
            "items must not be empty"
        );
        assert_eq!(
            ValidationError::NotAList {
                field: "items".to_string()
            }
            .to_string(),
            "items must be a list"
        );
        assert_eq!(
            ValidationError::MissingItemFields.to_string(),
            "item must have price and qty"
        );
        assert_eq!(
            ValidationError::must_be_positive("qty").to_string(),
            "qty must be positive"
        );
    }

    #[test]
    fn test_checkout_error_messages() {
        let err = CheckoutError::unknown_coupon("BADCODE");
        assert_eq!(err.to_string(), "unknown coupon: BADCODE");

        let err: CheckoutError = ValidationError::must_be_positive("price").into();
        assert_eq!(err.to_string(), "Invalid request: price must be positive");
    }

    #[test]
    fn test_validation_converts_to_checkout_error() {
        let err: CheckoutError = ValidationError::required("items").into();
        assert!(matches!(err, CheckoutError::InvalidRequest(_)));
        assert_eq!(err.validation(), Some(&ValidationError::required("items")));
        assert_eq!(CheckoutError::unknown_coupon("X").validation(), None);
    }
}
