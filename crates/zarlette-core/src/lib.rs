//! # zarlette-core: Pure Business Logic for Zarlette POS
//!
//! This crate is the **heart** of Zarlette POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Zarlette POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (TypeScript SPA)                       │   │
//! │  │    Login ──► Dashboard ──► POS Cart ──► Checkout ──► Receipt   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated bindings (ts-rs)             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/salon Commands Layer                       │   │
//! │  │    add_to_cart, confirm_checkout, load_products, etc.          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ zarlette-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────────────────────┐  │   │
//! │  │   │   types   │  │   money   │  │        validation         │  │   │
//! │  │   │  Product  │  │   Money   │  │   names, prices, ranges   │  │   │
//! │  │   │   Sale    │  │  (mils)   │  │   cart size, queries      │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 zarlette-api (REST Client)                      │   │
//! │  │        /sales, /products, /categories, /inventory-report        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Sale, stats shapes)
//! - [`cart`] - The in-memory cart and its derived totals
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in mils (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use zarlette_core::money::Money;
//!
//! // Create money from mils (never from floats!)
//! let price = Money::from_major(150);
//! let discount = Money::from_mils(10_000);
//!
//! // Totals stay exact and format to the fixed 3-decimal UI shape
//! assert_eq!((price - discount).to_string(), "140.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use zarlette_core::Money` instead of
// `use zarlette_core::money::Money`

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Pseudo-category id meaning "no category filter".
///
/// ## Why a constant?
/// The product grid's first tab is not a real category; the collaborator
/// recognizes `category=ALL` (or an omitted filter) as "everything". Keeping
/// the sentinel here stops it from being retyped in filters and forms.
pub const ALL_CATEGORIES: &str = "ALL";

/// Maximum items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Each added product is its own line item (no quantity merging), so a busy
/// sale grows the cart quickly; 100 lines is still far beyond any real visit.
pub const MAX_CART_ITEMS: usize = 100;
