//! # API Error Type
//!
//! What a caller of the CLI receives when a checkout fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout_core::process_checkout_json                                  │
//! │         │                                                               │
//! │         ├── CheckoutError::InvalidRequest(e) ─► INVALID_REQUEST         │
//! │         │                                                               │
//! │         └── CheckoutError::UnknownCoupon     ─► UNKNOWN_COUPON          │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                      stdout: {"code": "...", "message": "..."}          │
//! │                      exit status 2                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_core::CheckoutError;
use serde::Serialize;

/// Error printed to stdout when a checkout is rejected.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_REQUEST",
///   "message": "items must not be empty"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or malformed request field
    InvalidRequest,

    /// Coupon code outside the recognized set
    UnknownCoupon,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Process exit status for a rejected checkout.
    pub const EXIT_CODE: i32 = 2;
}

/// Converts checkout errors to API errors.
impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::InvalidRequest(e) => {
                ApiError::new(ErrorCode::InvalidRequest, e.to_string())
            }
            e @ CheckoutError::UnknownCoupon { .. } => {
                ApiError::new(ErrorCode::UnknownCoupon, e.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
