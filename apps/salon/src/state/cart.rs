//! # Cart State
//!
//! App-state wrapper around the core cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Commands can run concurrently on the async runtime
//!
//! The lock is only held for short synchronous sections, never across an
//! await: checkout snapshots the cart, releases the lock, performs the
//! network call, and re-locks to clear on success.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use zarlette_core::{Cart, CartItem, CoreResult, Product};

/// Managed cart state.
///
/// ## Why Not RwLock?
/// Cart operations are quick and most of them modify state. A RwLock would
/// add complexity with minimal benefit.
#[derive(Debug)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = cart_state.with_cart(|cart| cart.grand_total());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.remove_item(id))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Adds a product as a new line, stamping the line id from the wall
    /// clock (the core cart itself has no clock access).
    pub fn add_product(&self, product: &Product) -> CoreResult<i64> {
        let now_ms = Utc::now().timestamp_millis();
        self.with_cart_mut(|cart| cart.add_item(product, now_ms))
    }

    /// Replaces the cart contents with restored lines (held-sale resume).
    pub fn restore(&self, items: Vec<CartItem>) {
        self.with_cart_mut(|cart| cart.restore(items));
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
