//! # Catalog Commands
//!
//! Category tabs and the product grid for the POS screen.

use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use zarlette_core::{validation, Category, Product};

use crate::error::AppError;
use crate::AppContext;

/// Product grid state after a load.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductGrid {
    pub products: Vec<Product>,
    /// True when the fetch succeeded but returned nothing.
    pub no_services_found: bool,
}

/// Fetches categories into the catalog cache; the first category becomes
/// the active tab on first load.
///
/// A failure leaves the cached list as-is and is reported; the screen shows
/// its own "failed to load" state.
pub async fn load_categories(ctx: &AppContext) -> Result<Vec<Category>, AppError> {
    ctx.session.require()?;
    debug!("load_categories command");

    match ctx.api.list_categories().await {
        Ok(categories) => {
            ctx.catalog.set_categories(categories.clone());
            Ok(categories)
        }
        Err(err) => {
            warn!("Failed to load categories: {}", err);
            Err(err.into())
        }
    }
}

/// Switches the active category tab. The grid refreshes via
/// `load_products`.
pub async fn select_category(ctx: &AppContext, category_id: String) -> Result<(), AppError> {
    ctx.session.require()?;
    debug!(category = %category_id, "select_category command");

    ctx.catalog.select_category(category_id);
    Ok(())
}

/// Updates the search term. The grid refreshes via `load_products`.
pub async fn set_search(ctx: &AppContext, term: String) -> Result<(), AppError> {
    ctx.session.require()?;

    let term = validation::validate_search_query(&term)?;
    ctx.catalog.set_search(term);
    Ok(())
}

/// Fetches products for the active category/search into the grid.
///
/// Stale-response guard: the fetch takes a generation token; if another
/// fetch started while this one was in flight, the response is discarded
/// and the newer fetch's result stands.
pub async fn load_products(ctx: &AppContext) -> Result<ProductGrid, AppError> {
    ctx.session.require()?;

    let category = ctx.catalog.active_category();
    let search = ctx.catalog.search();
    debug!(category = %category, search = %search, "load_products command");

    let token = ctx.catalog.begin_fetch();
    match ctx.api.list_products(&category, &search).await {
        Ok(products) => {
            ctx.catalog.apply_products(token, products);
            Ok(ProductGrid {
                products: ctx.catalog.products(),
                no_services_found: ctx.catalog.no_services_found(),
            })
        }
        Err(err) => {
            warn!("Failed to load products: {}", err);
            Err(err.into())
        }
    }
}
