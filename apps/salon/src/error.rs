//! # App Error Type
//!
//! Unified error type for the commands surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Zarlette POS                           │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  invoke('confirm_checkout')                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Guard failed? ──── CoreError::InsufficientTendered ──┐         │  │
//! │  │         │                                             │         │  │
//! │  │         ▼                                             ▼         │  │
//! │  │  Request failed? ── ClientError::Conflict ────────► AppError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "PAYMENT_ERROR"                                          │
//! │    // e.message = "Please enter a reference number"                     │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `message` is always safe to show the user: server wording when the
//! server supplied some, the fixed connectivity line for transport failures,
//! and the guard's own wording for validation. Internals are logged via
//! `tracing::error!` before being collapsed.

use serde::Serialize;
use ts_rs::TS;

use zarlette_api::ClientError;
use zarlette_core::{CoreError, ValidationError};

/// Error returned from commands, serialized for the frontend.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CONFLICT",
///   "message": "Cannot delete category because it's being used by one or more products."
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed (empty cart, unknown line, size cap)
    CartError,

    /// Checkout state machine refused the transition
    CheckoutError,

    /// Payment input rejected (tendered too low, missing reference)
    PaymentError,

    /// Command requires a logged-in session
    AuthRequired,

    /// Credential check failed
    AuthFailed,

    /// Server reported the resource is still referenced (409)
    Conflict,

    /// No response from the collaborator (connection, DNS, timeout)
    NetworkError,

    /// The collaborator rejected the request
    ApiError,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the "command requires login" error.
    pub fn auth_required() -> Self {
        AppError::new(ErrorCode::AuthRequired, "Please log in first")
    }

    /// Creates the failed-login error with the login screen's wording.
    pub fn auth_failed() -> Self {
        AppError::new(ErrorCode::AuthFailed, "Invalid credentials. Please try again.")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts core business errors. Guard errors carry user-facing wording in
/// their Display impl, so the message passes through unchanged.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        let code = match err {
            CoreError::EmptyCart
            | CoreError::CartTooLarge { .. }
            | CoreError::CartItemNotFound { .. } => ErrorCode::CartError,
            CoreError::InsufficientTendered { .. } | CoreError::MissingReference => {
                ErrorCode::PaymentError
            }
            CoreError::CheckoutInProgress | CoreError::InvalidCheckoutState { .. } => {
                ErrorCode::CheckoutError
            }
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, message)
    }
}

/// Converts input validation errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts REST client errors.
///
/// The full error is logged here; the frontend only ever sees
/// `user_message()` (server wording, the fixed connectivity line, or the
/// error's own description).
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        tracing::error!("API request failed: {}", err);

        let code = if err.is_network() {
            ErrorCode::NetworkError
        } else {
            match err {
                ClientError::NotFound { .. } => ErrorCode::NotFound,
                ClientError::Conflict { .. } => ErrorCode::Conflict,
                ClientError::Validation { .. } => ErrorCode::ValidationError,
                ClientError::Unauthorized { .. }
                | ClientError::Server { .. }
                | ClientError::Decode(_)
                | ClientError::Transport(_) => ErrorCode::ApiError,
                ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_) => ErrorCode::Internal,
            }
        };

        AppError::new(code, err.user_message())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use zarlette_core::Money;

    #[test]
    fn test_checkout_guards_map_to_payment_error() {
        let err: AppError = CoreError::InsufficientTendered {
            tendered: Money::from_major(100),
            total: Money::from_major(140),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(
            err.message,
            "Please enter a valid amount equal to or greater than the total"
        );

        let err: AppError = CoreError::MissingReference.into();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Please enter a reference number");
    }

    #[test]
    fn test_empty_cart_maps_to_cart_error() {
        let err: AppError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Your cart is empty!");
    }

    #[test]
    fn test_conflict_carries_server_message() {
        let err: AppError = ClientError::Conflict {
            message: Some(
                "Cannot delete category because it's being used by one or more products."
                    .to_string(),
            ),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(err.message.starts_with("Cannot delete category"));
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let err = AppError::auth_failed();
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["code"], "AUTH_FAILED");
        assert_eq!(v["message"], "Invalid credentials. Please try again.");
    }
}
