//! # Checkout Commands
//!
//! Orchestrates the payment modal and the single sale-creation request.
//!
//! ## Confirm Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  confirm_checkout                                                       │
//! │                                                                         │
//! │  1. require session                                                     │
//! │  2. snapshot grand total ── cart empty? ──► CART_ERROR, stop            │
//! │  3. begin_submit(total)  ── guard fails? ──► PAYMENT_ERROR, modal       │
//! │     (locks released)          stays open, NO network call               │
//! │  4. snapshot cart into SaleDraft                                        │
//! │  5. POST /sales with Idempotency-Key         ◄── the only await         │
//! │  6a. success: clear cart, Success(sale), build receipt + message        │
//! │  6b. failure: cart untouched, Failure(message), error returned          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use zarlette_core::{CoreError, Money, PaymentMethod};

use crate::error::AppError;
use crate::receipt::Receipt;
use crate::AppContext;

/// What the payment modal shows.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub payment_method: PaymentMethod,
    pub grand_total: Money,
    /// `tendered − grandTotal`, pinned to zero while below the total.
    pub change: Money,
}

/// Result of a successful confirm.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    /// "Sale completed successfully! Invoice: {invoice_number}"
    pub message: String,
    pub receipt: Receipt,
}

fn view(ctx: &AppContext) -> CheckoutView {
    let grand_total = ctx.cart.with_cart(|c| c.grand_total());
    CheckoutView {
        payment_method: ctx.checkout.payment_method(),
        grand_total,
        change: ctx.checkout.change(grand_total),
    }
}

/// Opens the payment modal. Rejected with "Your cart is empty!" when there
/// is nothing to sell.
pub async fn open_checkout(ctx: &AppContext) -> Result<CheckoutView, AppError> {
    ctx.session.require()?;
    debug!("open_checkout command");

    let cart_is_empty = ctx.cart.with_cart(|c| c.is_empty());
    ctx.checkout.open(cart_is_empty)?;
    Ok(view(ctx))
}

/// Switches between cash and online. The other mode's fields are cleared.
pub async fn set_payment_method(
    ctx: &AppContext,
    method: PaymentMethod,
) -> Result<CheckoutView, AppError> {
    ctx.session.require()?;
    debug!(method = %method, "set_payment_method command");

    ctx.checkout.set_method(method);
    Ok(view(ctx))
}

/// Records the cash tendered input and returns the recomputed change.
pub async fn set_tendered(ctx: &AppContext, input: String) -> Result<CheckoutView, AppError> {
    ctx.session.require()?;

    ctx.checkout.set_tendered(input);
    Ok(view(ctx))
}

/// Records the online reference-number input.
pub async fn set_reference(ctx: &AppContext, input: String) -> Result<CheckoutView, AppError> {
    ctx.session.require()?;

    ctx.checkout.set_reference(input);
    Ok(view(ctx))
}

/// Confirms the payment and submits the sale.
pub async fn confirm_checkout(ctx: &AppContext) -> Result<CheckoutOutcome, AppError> {
    ctx.session.require()?;
    debug!("confirm_checkout command");

    let (cart_is_empty, grand_total) = ctx.cart.with_cart(|c| (c.is_empty(), c.grand_total()));
    if cart_is_empty {
        return Err(CoreError::EmptyCart.into());
    }

    // Validation and the Idle/Submitting transitions happen under the
    // checkout lock; the lock is released before the request goes out.
    let ticket = ctx.checkout.begin_submit(grand_total)?;
    let draft = ctx.cart.with_cart(|c| {
        c.to_draft(ticket.payment_method, Some(ticket.notes.clone()), None)
    });

    match ctx.api.create_sale(&draft, ticket.idempotency_key).await {
        Ok(response) => {
            ctx.cart.with_cart_mut(|c| c.clear());

            let message = format!(
                "Sale completed successfully! Invoice: {}",
                response.sale.invoice_number
            );
            let receipt = Receipt::from_sale(&ctx.config, &response.sale);
            info!(invoice = %response.sale.invoice_number, total = %response.sale.grand_total, "Sale completed");

            ctx.checkout.complete_success(response.sale);
            Ok(CheckoutOutcome { message, receipt })
        }
        Err(err) => {
            // Cart stays intact for the retry; the modal does not reopen.
            let app_err: AppError = err.into();
            ctx.checkout.complete_failure(app_err.message.clone());
            Err(app_err)
        }
    }
}

/// Abandons the modal without submitting.
pub async fn cancel_checkout(ctx: &AppContext) -> Result<(), AppError> {
    ctx.session.require()?;
    debug!("cancel_checkout command");

    ctx.checkout.cancel();
    Ok(())
}

/// Dismisses the receipt or error overlay.
pub async fn dismiss_checkout(ctx: &AppContext) -> Result<(), AppError> {
    ctx.session.require()?;

    ctx.checkout.dismiss();
    Ok(())
}
