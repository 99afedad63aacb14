//! # API Gateway
//!
//! The trait seam between the application layer and the wire.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Gateway Seam                                     │
//! │                                                                         │
//! │  apps/salon commands ───► dyn SalonApi ───┬──► RestApi (production)     │
//! │                                           │      reqwest over HTTP      │
//! │                                           │                             │
//! │                                           └──► in-memory fake (tests)   │
//! │                                                  scripted responses,    │
//! │                                                  recorded calls,        │
//! │                                                  zero network           │
//! │                                                                         │
//! │  The command/state-machine tests assert "no network call was made"     │
//! │  by counting calls on the fake. That property is only testable          │
//! │  because the commands never see a concrete HTTP client.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use zarlette_core::{
    Category, DailySummary, InventoryItem, Product, ProductDraft, Sale, SaleDraft, SaleResponse,
    SaleStatus, SalesStats, StatsPeriod,
};

use crate::client::HttpClient;
use crate::config::ApiConfig;
use crate::endpoints::{self, ReceiptFormat, SaleFilter};
use crate::error::ClientResult;

/// The collaborator's full endpoint surface, one method per operation.
#[async_trait]
pub trait SalonApi: Send + Sync {
    // ----- Sales ------------------------------------------------------------

    /// Creates a sale. The idempotency key makes a retried attempt safe.
    async fn create_sale(
        &self,
        draft: &SaleDraft,
        idempotency_key: Uuid,
    ) -> ClientResult<SaleResponse>;

    /// Lists sale history with optional filters.
    async fn list_sales(&self, filter: &SaleFilter) -> ClientResult<Vec<Sale>>;

    /// Fetches a single sale.
    async fn get_sale(&self, id: i64) -> ClientResult<Sale>;

    /// Updates a sale's status (completed, cancelled, ...).
    async fn update_sale_status(
        &self,
        id: i64,
        status: SaleStatus,
        notes: &str,
    ) -> ClientResult<SaleResponse>;

    /// Fetches the server-rendered receipt for a sale.
    async fn get_receipt(&self, id: i64, format: ReceiptFormat) -> ClientResult<String>;

    // ----- Held sales -------------------------------------------------------

    /// Parks a sale for later resumption.
    async fn hold_sale(&self, draft: &SaleDraft) -> ClientResult<SaleResponse>;

    /// Lists parked sales.
    async fn list_held_sales(&self) -> ClientResult<Vec<Sale>>;

    /// Fetches one parked sale for resumption.
    async fn get_held_sale(&self, id: i64) -> ClientResult<Sale>;

    /// Deletes a parked sale.
    async fn delete_held_sale(&self, id: i64) -> ClientResult<()>;

    // ----- Aggregates -------------------------------------------------------

    /// Fetches aggregate sale statistics for the dashboard.
    async fn get_sales_stats(
        &self,
        period: StatsPeriod,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ClientResult<SalesStats>;

    /// Fetches the one-day rollup for end-of-day reports.
    async fn get_daily_summary(&self, date: Option<&str>) -> ClientResult<DailySummary>;

    /// Fetches the per-product quantity/revenue report for a date range.
    async fn inventory_report(
        &self,
        date_from: &str,
        date_to: &str,
        status: SaleStatus,
    ) -> ClientResult<Vec<InventoryItem>>;

    // ----- Catalog ----------------------------------------------------------

    /// Lists all categories.
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;

    /// Creates a category.
    async fn create_category(&self, name: &str) -> ClientResult<Category>;

    /// Renames a category.
    async fn update_category(&self, id: &str, name: &str) -> ClientResult<Category>;

    /// Deletes a category. 409 means it is still in use.
    async fn delete_category(&self, id: &str) -> ClientResult<()>;

    /// Lists products filtered by category (`ALL` or an id) and search term.
    async fn list_products(&self, category: &str, search: &str) -> ClientResult<Vec<Product>>;

    /// Fetches a single product.
    async fn get_product(&self, id: i64) -> ClientResult<Product>;

    /// Creates a product.
    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product>;

    /// Updates a product.
    async fn update_product(&self, id: i64, draft: &ProductDraft) -> ClientResult<Product>;

    /// Deletes a product.
    async fn delete_product(&self, id: i64) -> ClientResult<()>;
}

// =============================================================================
// REST Implementation
// =============================================================================

/// Production gateway: every method is one REST call through the shared
/// [`HttpClient`].
#[derive(Debug, Clone)]
pub struct RestApi {
    http: HttpClient,
}

impl RestApi {
    /// Builds the gateway from configuration.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        Ok(RestApi {
            http: HttpClient::new(config)?,
        })
    }

    /// Wraps an already-built HTTP client.
    pub fn with_client(http: HttpClient) -> Self {
        RestApi { http }
    }
}

#[async_trait]
impl SalonApi for RestApi {
    async fn create_sale(
        &self,
        draft: &SaleDraft,
        idempotency_key: Uuid,
    ) -> ClientResult<SaleResponse> {
        endpoints::sales::create_sale(&self.http, draft, idempotency_key).await
    }

    async fn list_sales(&self, filter: &SaleFilter) -> ClientResult<Vec<Sale>> {
        endpoints::sales::list_sales(&self.http, filter).await
    }

    async fn get_sale(&self, id: i64) -> ClientResult<Sale> {
        endpoints::sales::get_sale(&self.http, id).await
    }

    async fn update_sale_status(
        &self,
        id: i64,
        status: SaleStatus,
        notes: &str,
    ) -> ClientResult<SaleResponse> {
        endpoints::sales::update_sale_status(&self.http, id, status, notes).await
    }

    async fn get_receipt(&self, id: i64, format: ReceiptFormat) -> ClientResult<String> {
        endpoints::sales::get_receipt(&self.http, id, format).await
    }

    async fn hold_sale(&self, draft: &SaleDraft) -> ClientResult<SaleResponse> {
        endpoints::sales::hold_sale(&self.http, draft).await
    }

    async fn list_held_sales(&self) -> ClientResult<Vec<Sale>> {
        endpoints::sales::list_held_sales(&self.http).await
    }

    async fn get_held_sale(&self, id: i64) -> ClientResult<Sale> {
        endpoints::sales::get_held_sale(&self.http, id).await
    }

    async fn delete_held_sale(&self, id: i64) -> ClientResult<()> {
        endpoints::sales::delete_held_sale(&self.http, id).await
    }

    async fn get_sales_stats(
        &self,
        period: StatsPeriod,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ClientResult<SalesStats> {
        endpoints::sales::get_sales_stats(&self.http, period, start_date, end_date).await
    }

    async fn get_daily_summary(&self, date: Option<&str>) -> ClientResult<DailySummary> {
        endpoints::sales::get_daily_summary(&self.http, date).await
    }

    async fn inventory_report(
        &self,
        date_from: &str,
        date_to: &str,
        status: SaleStatus,
    ) -> ClientResult<Vec<InventoryItem>> {
        endpoints::reports::inventory_report(&self.http, date_from, date_to, status).await
    }

    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        endpoints::catalog::list_categories(&self.http).await
    }

    async fn create_category(&self, name: &str) -> ClientResult<Category> {
        endpoints::catalog::create_category(&self.http, name).await
    }

    async fn update_category(&self, id: &str, name: &str) -> ClientResult<Category> {
        endpoints::catalog::update_category(&self.http, id, name).await
    }

    async fn delete_category(&self, id: &str) -> ClientResult<()> {
        endpoints::catalog::delete_category(&self.http, id).await
    }

    async fn list_products(&self, category: &str, search: &str) -> ClientResult<Vec<Product>> {
        endpoints::catalog::list_products(&self.http, category, search).await
    }

    async fn get_product(&self, id: i64) -> ClientResult<Product> {
        endpoints::catalog::get_product(&self.http, id).await
    }

    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        endpoints::catalog::create_product(&self.http, draft).await
    }

    async fn update_product(&self, id: i64, draft: &ProductDraft) -> ClientResult<Product> {
        endpoints::catalog::update_product(&self.http, id, draft).await
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        endpoints::catalog::delete_product(&self.http, id).await
    }
}
