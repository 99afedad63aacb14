//! # Sale Endpoints
//!
//! Operations on `/sales` and its sub-resources.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use zarlette_core::{
    DailySummary, PaymentMethod, Sale, SaleDraft, SaleResponse, SaleStatus, SalesStats,
    StatsPeriod,
};

use crate::client::HttpClient;
use crate::error::ClientResult;

// =============================================================================
// Parameter Types
// =============================================================================

/// Filters for listing sale history. Every field is optional; only set
/// fields become query parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SaleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Receipt rendering formats the collaborator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptFormat {
    Html,
    Pdf,
}

impl ReceiptFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReceiptFormat::Html => "html",
            ReceiptFormat::Pdf => "pdf",
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// `POST /sales`. Carries the idempotency key so a network-level retry of
/// the same attempt cannot double-create the sale.
pub async fn create_sale(
    http: &HttpClient,
    draft: &SaleDraft,
    idempotency_key: Uuid,
) -> ClientResult<SaleResponse> {
    http.post_idempotent("/sales", draft, &idempotency_key.to_string())
        .await
}

/// `GET /sales` with optional filters.
pub async fn list_sales(http: &HttpClient, filter: &SaleFilter) -> ClientResult<Vec<Sale>> {
    http.get_query("/sales", filter).await
}

/// `GET /sales/{id}`.
pub async fn get_sale(http: &HttpClient, id: i64) -> ClientResult<Sale> {
    http.get(&format!("/sales/{}", id)).await
}

/// `PATCH /sales/{id}/status`.
pub async fn update_sale_status(
    http: &HttpClient,
    id: i64,
    status: SaleStatus,
    notes: &str,
) -> ClientResult<SaleResponse> {
    #[derive(Serialize)]
    struct StatusBody<'a> {
        status: SaleStatus,
        notes: &'a str,
    }

    http.patch(&format!("/sales/{}/status", id), &StatusBody { status, notes })
        .await
}

/// `GET /sales/{id}/receipt?format=`. Returns the rendered receipt body.
pub async fn get_receipt(
    http: &HttpClient,
    id: i64,
    format: ReceiptFormat,
) -> ClientResult<String> {
    http.get_text(
        &format!("/sales/{}/receipt", id),
        &[("format", format.as_str())],
    )
    .await
}

/// `POST /sales/hold`. The draft must carry status `on_hold`.
pub async fn hold_sale(http: &HttpClient, draft: &SaleDraft) -> ClientResult<SaleResponse> {
    http.post("/sales/hold", draft).await
}

/// `GET /sales/held`.
pub async fn list_held_sales(http: &HttpClient) -> ClientResult<Vec<Sale>> {
    http.get("/sales/held").await
}

/// `GET /sales/held/{id}`. Returns the parked sale for resumption.
pub async fn get_held_sale(http: &HttpClient, id: i64) -> ClientResult<Sale> {
    http.get(&format!("/sales/held/{}", id)).await
}

/// `DELETE /sales/held/{id}`.
pub async fn delete_held_sale(http: &HttpClient, id: i64) -> ClientResult<()> {
    http.delete(&format!("/sales/held/{}", id)).await
}

/// `GET /sales/stats?period=&start_date=&end_date=`.
///
/// Start/end dates only accompany the `custom` period, matching what the
/// collaborator expects.
pub async fn get_sales_stats(
    http: &HttpClient,
    period: StatsPeriod,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> ClientResult<SalesStats> {
    let mut query: Vec<(&str, String)> = vec![("period", period.as_str().to_string())];

    if period == StatsPeriod::Custom {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            query.push(("start_date", start.to_string()));
            query.push(("end_date", end.to_string()));
        }
    }

    http.get_query("/sales/stats", &query).await
}

/// `GET /sales/daily-summary?date=`. Omitting the date means today.
pub async fn get_daily_summary(
    http: &HttpClient,
    date: Option<&str>,
) -> ClientResult<DailySummary> {
    match date {
        Some(d) => http.get_query("/sales/daily-summary", &[("date", d)]).await,
        None => http.get("/sales/daily-summary").await,
    }
}
