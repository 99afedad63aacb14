//! # Category Commands
//!
//! Category CRUD following fetch → mutate → refetch: mutations return the
//! server's record and the screen reloads the list.

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use zarlette_core::{validation, Category};

use crate::error::{AppError, ErrorCode};
use crate::AppContext;

/// The delete-rejected wording shown when the server reports the category
/// is still referenced by products.
const CATEGORY_IN_USE: &str =
    "Cannot delete category because it's being used by one or more products.";

/// One row of the category management table.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOverview {
    pub category: Category,
    /// Products currently assigned to this category (client-side join).
    pub product_count: usize,
}

/// Lists categories with per-category product counts.
///
/// The counts are a client-side join over the full product list, the way
/// the management screen has always computed them.
pub async fn category_overview(ctx: &AppContext) -> Result<Vec<CategoryOverview>, AppError> {
    ctx.session.require()?;
    debug!("category_overview command");

    let categories = ctx.api.list_categories().await?;
    let products = ctx
        .api
        .list_products(zarlette_core::ALL_CATEGORIES, "")
        .await?;

    Ok(categories
        .into_iter()
        .map(|category| {
            let product_count = products
                .iter()
                .filter(|p| p.category == category.id)
                .count();
            CategoryOverview {
                category,
                product_count,
            }
        })
        .collect())
}

/// Creates a category. Name is validated before the network call.
pub async fn create_category(ctx: &AppContext, name: String) -> Result<Category, AppError> {
    ctx.session.require()?;
    debug!(name = %name, "create_category command");

    let name = validation::validate_category_name(&name)?;
    let category = ctx.api.create_category(&name).await?;
    info!(id = %category.id, "Category created");
    Ok(category)
}

/// Renames a category.
pub async fn rename_category(
    ctx: &AppContext,
    id: String,
    name: String,
) -> Result<Category, AppError> {
    ctx.session.require()?;
    debug!(id = %id, "rename_category command");

    let name = validation::validate_category_name(&name)?;
    let category = ctx.api.update_category(&id, &name).await?;
    info!(id = %category.id, "Category renamed");
    Ok(category)
}

/// Deletes a category.
///
/// A 409 means products still reference it; the fixed in-use message is
/// surfaced regardless of the server's own wording.
pub async fn delete_category(ctx: &AppContext, id: String) -> Result<(), AppError> {
    ctx.session.require()?;
    debug!(id = %id, "delete_category command");

    match ctx.api.delete_category(&id).await {
        Ok(()) => {
            info!(id = %id, "Category deleted");
            Ok(())
        }
        Err(err) if err.is_conflict() => {
            Err(AppError::new(ErrorCode::Conflict, CATEGORY_IN_USE))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_context;

    #[tokio::test]
    async fn test_overview_counts_products_per_category() {
        let (ctx, _api) = seeded_context();

        let overview = category_overview(&ctx).await.unwrap();
        let skincare = overview.iter().find(|o| o.category.id == "SKINCARE").unwrap();
        let hair = overview.iter().find(|o| o.category.id == "HAIR_CARE").unwrap();
        assert_eq!(skincare.product_count, 1);
        assert_eq!(hair.product_count, 1);
    }

    #[tokio::test]
    async fn test_create_validates_name_first() {
        let (ctx, api) = seeded_context();

        let err = create_category(&ctx, "   ".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(api.category_mutations(), 0);

        let category = create_category(&ctx, "  NAILS  ".to_string()).await.unwrap();
        assert_eq!(category.name, "NAILS");
    }

    #[tokio::test]
    async fn test_delete_conflict_maps_to_in_use_message() {
        let (ctx, api) = seeded_context();
        api.conflict_on_category_delete();

        let err = delete_category(&ctx, "SKINCARE".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(
            err.message,
            "Cannot delete category because it's being used by one or more products."
        );
    }
}
