//! # Report Endpoints
//!
//! Server-aggregated reporting: the inventory sales report consumed by the
//! inventory screen, CSV export, and the dashboard's top-products panel.

use zarlette_core::{InventoryItem, SaleStatus};

use crate::client::HttpClient;
use crate::error::ClientResult;

/// `GET /inventory-report?date_from=&date_to=&status=`.
///
/// Rows arrive with loose numeric typing (stringified numbers, nulls); the
/// `InventoryItem` deserializers coerce instead of failing, matching how the
/// report has always been consumed.
pub async fn inventory_report(
    http: &HttpClient,
    date_from: &str,
    date_to: &str,
    status: SaleStatus,
) -> ClientResult<Vec<InventoryItem>> {
    http.get_query(
        "/inventory-report",
        &[
            ("date_from", date_from),
            ("date_to", date_to),
            ("status", status.as_str()),
        ],
    )
    .await
}
