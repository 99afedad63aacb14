//! # Cart Module
//!
//! The in-memory cart for the sale in progress.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations Flow                              │
//! │                                                                         │
//! │  User Action               Operation              Cart Change           │
//! │  ───────────               ─────────              ───────────           │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ──────────► items.push(line)     │
//! │                                                                         │
//! │  Tick checkbox ──────────► toggle_item() ───────► line.checked flips   │
//! │                                                                         │
//! │  Tap trash icon ─────────► remove_item() ───────► line removed by id   │
//! │                                                                         │
//! │  Checkout succeeds ──────► clear() ─────────────► items emptied         │
//! │  Cancel sale ────────────► clear() ─────────────► items emptied         │
//! │                                                                         │
//! │  Resume held sale ───────► restore() ───────────► items replaced        │
//! │                                                                         │
//! │  A FAILED checkout never touches the cart: the cashier retries with    │
//! │  the exact same lines.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `sub_total = Σ line.price`, `total_discount = Σ line.discount`,
//!   `grand_total = sub_total − total_discount`. Always derived from the live
//!   items, never cached.
//! - No de-duplication: adding the same product twice yields two lines.
//! - Line ids are epoch milliseconds, made strictly monotonic so two adds in
//!   the same millisecond still get distinct ids.
//! - `checked` is selection state only; totals run over ALL lines.
//!
//! ## No Clock Here
//! The caller supplies the epoch-millisecond timestamp for new lines. This
//! crate stays deterministic; the app layer passes `Utc::now()`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Product, SaleDraft, SaleItemDraft, SaleStatus};
use crate::validation::validate_cart_size;

// =============================================================================
// Cart Item
// =============================================================================

/// One line of the sale in progress.
///
/// ## Snapshot Pattern
/// `name` and `price` are frozen at add-to-cart time. If the catalog product
/// is renamed or repriced while the sale is open, the cart keeps showing what
/// the customer agreed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Client-generated line id (epoch milliseconds, strictly monotonic
    /// within one cart).
    pub id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub price: Money,

    /// Absolute discount on this line.
    pub discount: Money,

    /// Line total (price − discount).
    pub total: Money,

    /// Selection state. Flipped by `toggle_item`; does not affect totals.
    pub checked: bool,

    /// Catalog reference.
    pub product_id: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered sequence of line items for the sale in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in insertion order.
    pub items: Vec<CartItem>,

    /// Highest line id handed out so far. Keeps same-millisecond adds unique.
    #[serde(skip)]
    #[ts(skip)]
    last_id: i64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Appends a new line for `product` with discount 0, total = price,
    /// checked = true.
    ///
    /// `now_ms` is the caller's epoch-millisecond clock reading; the line id
    /// is `max(now_ms, last_id + 1)` so ids stay strictly increasing even
    /// when two adds land in the same millisecond.
    ///
    /// ## Returns
    /// The new line's id.
    pub fn add_item(&mut self, product: &Product, now_ms: i64) -> CoreResult<i64> {
        validate_cart_size(self.items.len())?;

        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;

        self.items.push(CartItem {
            id,
            name: product.name.clone(),
            price: product.price,
            discount: Money::zero(),
            total: product.price,
            checked: true,
            product_id: product.id,
        });

        Ok(id)
    }

    /// Flips the `checked` flag on the line with `id`.
    ///
    /// Selection state only: totals are unaffected.
    pub fn toggle_item(&mut self, id: i64) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::CartItemNotFound { id })?;
        item.checked = !item.checked;
        Ok(())
    }

    /// Removes the line with `id`.
    pub fn remove_item(&mut self, id: i64) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);

        if self.items.len() == before {
            Err(CoreError::CartItemNotFound { id })
        } else {
            Ok(())
        }
    }

    /// Empties the cart. Called after a successful checkout or an explicit
    /// cancel, never on failure.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the cart contents with the given lines (held-sale resume).
    ///
    /// `last_id` is bumped past the restored ids so later adds stay unique.
    pub fn restore(&mut self, items: Vec<CartItem>) {
        self.last_id = items
            .iter()
            .map(|i| i.id)
            .max()
            .unwrap_or(self.last_id)
            .max(self.last_id);
        self.items = items;
    }

    // =========================================================================
    // Derived Totals
    // =========================================================================
    // Recomputed from the live items on every call. No cached total can
    // diverge from the sum.

    /// Sum of line prices over ALL items.
    pub fn sub_total(&self) -> Money {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Sum of line discounts over ALL items.
    pub fn total_discount(&self) -> Money {
        self.items.iter().map(|i| i.discount).sum()
    }

    /// `sub_total − total_discount`; the amount due at checkout.
    pub fn grand_total(&self) -> Money {
        self.sub_total() - self.total_discount()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Sale Submission
    // =========================================================================

    /// Snapshots the lines into the wire shape the Sale endpoint expects.
    ///
    /// Line ids and the `checked` flag are client-side state and stay off
    /// the wire; line totals are recomputed as `price − discount`.
    pub fn to_sale_items(&self) -> Vec<SaleItemDraft> {
        self.items
            .iter()
            .map(|i| SaleItemDraft {
                name: i.name.clone(),
                price: i.price,
                discount: i.discount,
                total: i.price - i.discount,
                product_id: i.product_id,
            })
            .collect()
    }

    /// Builds the full POST body for a sale, with derived totals.
    pub fn to_draft(
        &self,
        payment_method: PaymentMethod,
        notes: Option<String>,
        status: Option<SaleStatus>,
    ) -> SaleDraft {
        SaleDraft {
            cart_items: self.to_sale_items(),
            sub_total: self.sub_total(),
            total_discount: self.total_discount(),
            grand_total: self.grand_total(),
            payment_method,
            notes,
            status,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
