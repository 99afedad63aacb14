//! # Cart Commands
//!
//! All local state, no network: a cart operation that fails leaves the
//! cart exactly as it was.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use zarlette_core::{CartItem, Money};

use crate::error::AppError;
use crate::AppContext;

/// Cart snapshot for the POS side panel.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub sub_total: Money,
    pub total_discount: Money,
    pub grand_total: Money,
}

impl CartView {
    fn snapshot(ctx: &AppContext) -> Self {
        ctx.cart.with_cart(|cart| CartView {
            items: cart.items.clone(),
            sub_total: cart.sub_total(),
            total_discount: cart.total_discount(),
            grand_total: cart.grand_total(),
        })
    }
}

/// Returns the current cart with derived totals.
pub async fn get_cart(ctx: &AppContext) -> Result<CartView, AppError> {
    ctx.session.require()?;
    Ok(CartView::snapshot(ctx))
}

/// Adds a product from the loaded grid as a new line item.
///
/// The product is resolved from the catalog cache; adding something that is
/// not on screen is a client bug, reported as NOT_FOUND without a network
/// call.
pub async fn add_to_cart(ctx: &AppContext, product_id: i64) -> Result<CartView, AppError> {
    ctx.session.require()?;
    debug!(product_id, "add_to_cart command");

    let product = ctx
        .catalog
        .find_product(product_id)
        .ok_or_else(|| AppError::not_found("Product", product_id))?;

    ctx.cart.add_product(&product)?;
    Ok(CartView::snapshot(ctx))
}

/// Flips a line's selection checkbox. Totals are unaffected.
pub async fn toggle_cart_item(ctx: &AppContext, item_id: i64) -> Result<CartView, AppError> {
    ctx.session.require()?;
    debug!(item_id, "toggle_cart_item command");

    ctx.cart.with_cart_mut(|cart| cart.toggle_item(item_id))?;
    Ok(CartView::snapshot(ctx))
}

/// Removes a line item.
pub async fn remove_from_cart(ctx: &AppContext, item_id: i64) -> Result<CartView, AppError> {
    ctx.session.require()?;
    debug!(item_id, "remove_from_cart command");

    ctx.cart.with_cart_mut(|cart| cart.remove_item(item_id))?;
    Ok(CartView::snapshot(ctx))
}

/// Empties the cart (the explicit "cancel sale" action).
pub async fn clear_cart(ctx: &AppContext) -> Result<CartView, AppError> {
    ctx.session.require()?;
    debug!("clear_cart command");

    ctx.cart.with_cart_mut(|cart| cart.clear());
    Ok(CartView::snapshot(ctx))
}
