//! # Product Commands
//!
//! The management screen's product table and its create/edit/delete form.

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use zarlette_core::{validation, Money, Product, ProductDraft};

use crate::error::AppError;
use crate::AppContext;

/// One row of the product management table: the product plus its category's
/// display name resolved client-side.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub product: Product,
    /// Display name of the product's category; falls back to the raw id
    /// when the category no longer exists.
    pub category_name: String,
}

/// Raw form input for create/edit. Validation happens here, not in the form.
#[derive(Debug, Clone, serde::Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub price: Money,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProductForm {
    fn into_draft(self) -> Result<ProductDraft, AppError> {
        let name = validation::validate_product_name(&self.name)?;
        let category = validation::validate_category_id(&self.category)?;
        validation::validate_price(self.price)?;
        Ok(ProductDraft {
            name,
            price: self.price,
            category,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            image: self.image.filter(|i| !i.is_empty()),
        })
    }
}

/// Lists all products with category names resolved from the category list.
pub async fn product_rows(ctx: &AppContext) -> Result<Vec<ProductRow>, AppError> {
    ctx.session.require()?;
    debug!("product_rows command");

    let categories = ctx.api.list_categories().await?;
    let products = ctx
        .api
        .list_products(zarlette_core::ALL_CATEGORIES, "")
        .await?;

    Ok(products
        .into_iter()
        .map(|product| {
            let category_name = categories
                .iter()
                .find(|c| c.id == product.category)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| product.category.clone());
            ProductRow {
                product,
                category_name,
            }
        })
        .collect())
}

/// Creates a product from the form. Invalid input never reaches the wire.
pub async fn create_product(ctx: &AppContext, form: ProductForm) -> Result<Product, AppError> {
    ctx.session.require()?;
    debug!(name = %form.name, "create_product command");

    let draft = form.into_draft()?;
    let product = ctx.api.create_product(&draft).await?;
    info!(id = product.id, name = %product.name, "Product created");
    Ok(product)
}

/// Replaces a product's fields from the form.
pub async fn update_product(
    ctx: &AppContext,
    id: i64,
    form: ProductForm,
) -> Result<Product, AppError> {
    ctx.session.require()?;
    debug!(id, "update_product command");

    let draft = form.into_draft()?;
    let product = ctx.api.update_product(id, &draft).await?;
    info!(id = product.id, "Product updated");
    Ok(product)
}

/// Deletes a product. Existing sales keep their denormalized line data.
pub async fn delete_product(ctx: &AppContext, id: i64) -> Result<(), AppError> {
    ctx.session.require()?;
    debug!(id, "delete_product command");

    ctx.api.delete_product(id).await?;
    info!(id, "Product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::seeded_context;

    fn form(name: &str, price: Money, category: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            price,
            category: category.to_string(),
            description: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_rows_resolve_category_names() {
        let (ctx, _api) = seeded_context();

        let rows = product_rows(&ctx).await.unwrap();
        let cleanser = rows.iter().find(|r| r.product.id == 1).unwrap();
        assert_eq!(cleanser.category_name, "Skincare");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input_before_network() {
        let (ctx, api) = seeded_context();

        let err = create_product(&ctx, form("", Money::from_mils(1_000), "SKINCARE"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = create_product(&ctx, form("Toner", Money::zero(), "SKINCARE"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = create_product(&ctx, form("Toner", Money::from_mils(1_000), "ALL"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(api.product_mutations(), 0);
    }

    #[tokio::test]
    async fn test_create_trims_and_submits() {
        let (ctx, api) = seeded_context();

        let product = create_product(
            &ctx,
            ProductForm {
                name: "  Toner  ".to_string(),
                price: Money::from_major(299),
                category: "SKINCARE".to_string(),
                description: Some("   ".to_string()),
                image: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(product.name, "Toner");
        assert_eq!(api.product_mutations(), 1);
        let draft = api.last_product_draft().unwrap();
        assert_eq!(draft.description, None);
    }
}
