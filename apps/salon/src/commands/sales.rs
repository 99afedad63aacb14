//! # Sales Commands
//!
//! Sales history, held sales (park and resume), and receipt documents.

use chrono::Utc;
use tracing::{debug, info};

use zarlette_api::{ReceiptFormat, SaleFilter};
use zarlette_core::{CartItem, CoreError, DailySummary, Sale, SaleStatus};

use crate::error::AppError;
use crate::AppContext;

/// Parks the current cart as an on-hold sale and clears it.
///
/// The hold carries the full line data, so resuming works even after the
/// products change or disappear.
pub async fn hold_sale(ctx: &AppContext, notes: Option<String>) -> Result<Sale, AppError> {
    ctx.session.require()?;
    debug!("hold_sale command");

    let (is_empty, draft) = ctx.cart.with_cart(|c| {
        (
            c.is_empty(),
            c.to_draft(
                zarlette_core::PaymentMethod::Cash,
                notes.clone(),
                Some(SaleStatus::OnHold),
            ),
        )
    });
    if is_empty {
        return Err(CoreError::EmptyCart.into());
    }

    let response = ctx.api.hold_sale(&draft).await?;
    ctx.cart.with_cart_mut(|c| c.clear());
    info!(invoice = %response.sale.invoice_number, "Sale held");
    Ok(response.sale)
}

/// Lists parked sales, newest first as the server returns them.
pub async fn list_held_sales(ctx: &AppContext) -> Result<Vec<Sale>, AppError> {
    ctx.session.require()?;
    debug!("list_held_sales command");

    Ok(ctx.api.list_held_sales().await?)
}

/// Loads a held sale back into the cart, replacing whatever is there, and
/// removes the hold.
pub async fn resume_held_sale(ctx: &AppContext, sale_id: i64) -> Result<(), AppError> {
    ctx.session.require()?;
    debug!(sale_id, "resume_held_sale command");

    let sale = ctx.api.get_held_sale(sale_id).await?;
    let now_ms = Utc::now().timestamp_millis();

    let items = sale
        .sale_items
        .iter()
        .enumerate()
        .map(|(index, line)| CartItem {
            id: now_ms + index as i64,
            name: line.product_name.clone(),
            price: line.unit_price,
            discount: line.discount,
            total: line.unit_price - line.discount,
            checked: true,
            product_id: line.product_id.unwrap_or_default(),
        })
        .collect();

    ctx.cart.restore(items);
    ctx.api.delete_held_sale(sale_id).await?;
    info!(sale_id, invoice = %sale.invoice_number, "Held sale resumed");
    Ok(())
}

/// Discards a parked sale without resuming it.
pub async fn delete_held_sale(ctx: &AppContext, sale_id: i64) -> Result<(), AppError> {
    ctx.session.require()?;
    debug!(sale_id, "delete_held_sale command");

    ctx.api.delete_held_sale(sale_id).await?;
    info!(sale_id, "Held sale discarded");
    Ok(())
}

/// Lists past sales with the history screen's filters.
pub async fn list_sales(ctx: &AppContext, filter: SaleFilter) -> Result<Vec<Sale>, AppError> {
    ctx.session.require()?;
    debug!(?filter, "list_sales command");

    Ok(ctx.api.list_sales(&filter).await?)
}

/// Fetches a single sale's detail view.
pub async fn get_sale(ctx: &AppContext, sale_id: i64) -> Result<Sale, AppError> {
    ctx.session.require()?;
    debug!(sale_id, "get_sale command");

    Ok(ctx.api.get_sale(sale_id).await?)
}

/// Cancels a completed sale with a mandatory reason.
pub async fn cancel_sale(ctx: &AppContext, sale_id: i64, reason: String) -> Result<Sale, AppError> {
    ctx.session.require()?;
    debug!(sale_id, "cancel_sale command");

    let reason = reason.trim().to_string();
    if reason.is_empty() {
        return Err(AppError::validation("A cancellation reason is required"));
    }

    let response = ctx
        .api
        .update_sale_status(sale_id, SaleStatus::Cancelled, &reason)
        .await?;
    info!(sale_id, invoice = %response.sale.invoice_number, "Sale cancelled");
    Ok(response.sale)
}

/// Fetches the printable receipt document for a sale.
pub async fn receipt_document(
    ctx: &AppContext,
    sale_id: i64,
    format: ReceiptFormat,
) -> Result<String, AppError> {
    ctx.session.require()?;
    debug!(sale_id, ?format, "receipt_document command");

    Ok(ctx.api.get_receipt(sale_id, format).await?)
}

/// Fetches the end-of-day summary for a date (`YYYY-MM-DD`), or today.
pub async fn daily_summary(
    ctx: &AppContext,
    date: Option<String>,
) -> Result<DailySummary, AppError> {
    ctx.session.require()?;
    debug!(?date, "daily_summary command");

    Ok(ctx.api.get_daily_summary(date.as_deref()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::testing::seeded_context;

    #[tokio::test]
    async fn test_hold_requires_items() {
        let (ctx, api) = seeded_context();

        let err = hold_sale(&ctx, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(api.hold_sale_calls(), 0);
    }

    #[tokio::test]
    async fn test_hold_clears_cart_and_marks_on_hold() {
        let (ctx, api) = seeded_context();
        add_to_cart(&ctx, 1).await.unwrap();

        let sale = hold_sale(&ctx, Some("walk-in, back at 3".to_string()))
            .await
            .unwrap();
        assert_eq!(sale.status, SaleStatus::OnHold);
        assert!(ctx.cart.with_cart(|c| c.is_empty()));

        let draft = api.last_hold_draft().unwrap();
        assert_eq!(draft.status, Some(SaleStatus::OnHold));
        assert_eq!(draft.notes.as_deref(), Some("walk-in, back at 3"));
    }

    #[tokio::test]
    async fn test_resume_replaces_cart_and_deletes_hold() {
        let (ctx, api) = seeded_context();
        add_to_cart(&ctx, 2).await.unwrap();
        let held = hold_sale(&ctx, None).await.unwrap();

        // Something else in the cart; resume must replace it.
        add_to_cart(&ctx, 1).await.unwrap();
        resume_held_sale(&ctx, held.id).await.unwrap();

        let (len, name) = ctx
            .cart
            .with_cart(|c| (c.len(), c.items[0].name.clone()));
        assert_eq!(len, 1);
        assert_eq!(name, "Hair Serum");
        assert_eq!(api.deleted_held_sales(), vec![held.id]);
    }

    #[tokio::test]
    async fn test_cancel_requires_reason() {
        let (ctx, _api) = seeded_context();

        let err = cancel_sale(&ctx, 7, "   ".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
