//! # Error Types
//!
//! Domain-specific error types for zarlette-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zarlette-core errors (this file)                                       │
//! │  ├── CoreError        - Cart/checkout rule violations                   │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  zarlette-api errors (separate crate)                                   │
//! │  └── ClientError      - REST transport/status failures                  │
//! │                                                                         │
//! │  App errors (in apps/salon)                                             │
//! │  └── AppError         - What the frontend sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → AppError → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error values (item id, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Checkout guard errors display the exact message the cashier sees

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent cart/checkout rule violations. The checkout guards
/// carry their cashier-facing wording directly, because blocking a confirm
/// and telling the user why is the whole point of the guard.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    ///
    /// ## When This Occurs
    /// - Opening the payment modal with zero line items
    /// - Submitting a hold request for an empty cart
    #[error("Your cart is empty!")]
    EmptyCart,

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// A cart line id did not match any line item.
    #[error("Cart item not found: {id}")]
    CartItemNotFound { id: i64 },

    /// Cash confirm with tendered below the amount due.
    ///
    /// ## User Workflow
    /// ```text
    /// Grand total: 140.000
    ///      │
    ///      ▼
    /// Cashier enters tendered: 100
    ///      │
    ///      ▼
    /// InsufficientTendered { tendered: 100.000, total: 140.000 }
    ///      │
    ///      ▼
    /// Modal stays open, no request is made
    /// ```
    #[error("Please enter a valid amount equal to or greater than the total")]
    InsufficientTendered { tendered: Money, total: Money },

    /// Online confirm without a reference number.
    #[error("Please enter a reference number")]
    MissingReference,

    /// A second confirm arrived while a submission is outstanding.
    #[error("A sale is already being processed")]
    CheckoutInProgress,

    /// The checkout state machine was asked for a transition its current
    /// state does not allow.
    #[error("Checkout is {current}, cannot perform this operation")]
    InvalidCheckoutState { current: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any network call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed amount, inverted date range).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
