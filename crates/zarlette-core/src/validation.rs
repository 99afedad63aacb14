//! # Validation Module
//!
//! Input validation utilities for Zarlette POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command Layer (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: REST Collaborator                                            │
//! │  ├── Server-side validation (422 with message body)                    │
//! │  └── Referential checks (409 when a category is in use)                │
//! │                                                                         │
//! │  A request that fails Layer 2 never reaches the network               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zarlette_core::validation::{validate_product_name, validate_price};
//! use zarlette_core::money::Money;
//!
//! assert_eq!(validate_product_name(" Hair Serum ").unwrap(), "Hair Serum");
//! assert!(validate_price(Money::from_major(450)).is_ok());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_CART_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use zarlette_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Facial Cleanser").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name(&"A".repeat(300)).is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates a category name.
///
/// Same shape as product names, shorter cap.
pub fn validate_category_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "category name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "category name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates a category id used on product forms.
///
/// The catalog treats `"ALL"` as a filter, never as an assignable category,
/// so it is rejected here alongside the empty string.
pub fn validate_category_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();

    if id.is_empty() || id.eq_ignore_ascii_case(crate::ALL_CATEGORIES) {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(id.to_string())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product/service price.
///
/// ## Rules
/// - Must be strictly positive; the product form rejects zero and below
///
/// ## Example
/// ```rust
/// use zarlette_core::validation::validate_price;
/// use zarlette_core::money::Money;
///
/// assert!(validate_price(Money::from_mils(499_990)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// assert!(validate_price(Money::from_major(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a report date range.
///
/// ## Rules
/// - `date_from` must not be after `date_to`
pub fn validate_date_range(date_from: NaiveDate, date_to: NaiveDate) -> ValidationResult<()> {
    if date_from > date_to {
        return Err(ValidationError::InvalidFormat {
            field: "date range".to_string(),
            reason: "start date must not be after end date".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of line items).
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("Matte Lipstick").unwrap(), "Matte Lipstick");
        assert_eq!(validate_product_name("  Hair Serum  ").unwrap(), "Hair Serum");

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_category_name() {
        assert_eq!(validate_category_name("SKINCARE").unwrap(), "SKINCARE");
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name(&"A".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_category_id_rejects_all_filter() {
        assert_eq!(validate_category_id("FRAGRANCE").unwrap(), "FRAGRANCE");
        assert!(validate_category_id("").is_err());
        assert!(validate_category_id("ALL").is_err());
        assert!(validate_category_id("all").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  serum ").unwrap(), "serum");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_mils(1)).is_ok());
        assert!(validate_price(Money::from_major(450)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_major(-10)).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert!(validate_date_range(from, to).is_ok());
        assert!(validate_date_range(to, to).is_ok());
        assert!(validate_date_range(to, from).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(99).is_ok());
        assert!(validate_cart_size(100).is_err());
        assert!(validate_cart_size(500).is_err());
    }
}
