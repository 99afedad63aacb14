//! # Domain Types
//!
//! Core domain types used throughout Zarlette POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   SaleDraft     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  cart_items[]   │   │  invoice_number │       │
//! │  │  name           │   │  sub_total      │   │  created_at     │       │
//! │  │  price (Money)  │   │  grand_total    │   │  sale_items[]   │       │
//! │  │  category       │   │  payment_method │   │  grand_total    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │   SaleStatus    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (string)    │   │  Completed      │   │  Cash           │       │
//! │  │  name           │   │  OnHold         │   │  Online         │       │
//! │  └─────────────────┘   │  Cancelled      │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Model
//! `Category` and `Product` are sourced from and owned by the external REST
//! collaborator; this process only ever holds read-only cached copies.
//! `SaleDraft` is built locally from the cart; the returned `Sale` is
//! authoritative for invoice number and timestamp and is never reconstructed
//! from client-side totals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

// =============================================================================
// Catalog
// =============================================================================

/// A product category (service group) as served by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// Category identifier. String on the wire ("SKINCARE", "HAIR_CARE").
    pub id: String,

    /// Display name shown on the category tabs.
    pub name: String,
}

/// A product (or salon service) available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier assigned by the collaborator.
    pub id: i64,

    /// Display name shown on the grid and on receipts.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Owning category id.
    pub category: String,

    /// Optional description for the product card.
    #[serde(default)]
    pub description: Option<String>,

    /// Optional image tag for the product card.
    #[serde(default)]
    pub image: Option<String>,
}

/// The body sent to create or update a product.
///
/// Validated client-side (name required, category required, price > 0)
/// before any network call is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays at checkout.
///
/// The two modes are mutually exclusive in the payment modal: cash collects
/// an amount tendered, online (digital wallet) collects a reference number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Digital wallet payment verified by a reference number.
    Online,
}

impl PaymentMethod {
    /// Wire/query-parameter form of the method.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction on the collaborator side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Sale has been paid and finalized.
    Completed,
    /// Sale was parked for later resumption.
    OnHold,
    /// Sale was cancelled/refunded.
    Cancelled,
}

impl SaleStatus {
    /// Wire/query-parameter form of the status.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::OnHold => "on_hold",
            SaleStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Completed
    }
}

// =============================================================================
// Sale Submission
// =============================================================================

/// One submitted line of a sale.
/// Uses snapshot pattern: name and price are frozen at add-to-cart time, so a
/// later catalog edit cannot rewrite a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItemDraft {
    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit price at time of sale (frozen).
    pub price: Money,

    /// Absolute discount applied to this line.
    pub discount: Money,

    /// Line total (price − discount).
    pub total: Money,

    /// Catalog reference.
    pub product_id: i64,
}

/// The body POSTed to create a sale.
///
/// Totals are carried for the collaborator's bookkeeping but are always the
/// derived cart sums, never independent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleDraft {
    pub cart_items: Vec<SaleItemDraft>,
    pub sub_total: Money,
    pub total_discount: Money,
    pub grand_total: Money,
    pub payment_method: PaymentMethod,
    /// Free text: "Amount tendered: {x}" or "Reference number: {y}".
    pub notes: Option<String>,
    /// Only set for hold submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SaleStatus>,
}

// =============================================================================
// Completed Sale (server-authoritative)
// =============================================================================

/// A line item of a completed sale, as returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    /// Product name at time of sale.
    pub product_name: String,

    /// Unit price at time of sale.
    pub unit_price: Money,

    /// Discount applied to this line.
    #[serde(default)]
    pub discount: Money,

    /// Line total after discount.
    #[serde(default)]
    pub total: Money,

    /// Catalog reference, when the collaborator echoes it back.
    #[serde(default)]
    pub product_id: Option<i64>,
}

/// A sale as recorded by the collaborator.
///
/// This is the receipt's only data source: `invoice_number` and `created_at`
/// exist nowhere on the client until the server assigns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    #[serde(default)]
    pub id: i64,

    /// Server-assigned invoice number.
    pub invoice_number: String,

    /// Server-assigned timestamp.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub status: SaleStatus,

    #[serde(default)]
    pub sale_items: Vec<SaleItem>,

    #[serde(default)]
    pub sub_total: Money,

    #[serde(default)]
    pub total_discount: Money,

    #[serde(default)]
    pub grand_total: Money,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Envelope the collaborator wraps a created/fetched sale in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub sale: Sale,
}

// =============================================================================
// Inventory Report
// =============================================================================

/// One row of the server-aggregated inventory report.
///
/// The collaborator is loose with numeric types here (numbers arrive as
/// strings, nulls appear), so every numeric field coerces instead of
/// failing, and an unnamed product becomes "Unknown Product".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lossy_i64")]
    pub id: i64,

    #[serde(default = "unknown_product", deserialize_with = "name_or_unknown")]
    pub name: String,

    /// Unit price.
    #[serde(default, deserialize_with = "money::lossy_or_zero")]
    pub price: Money,

    /// Units sold over the requested range.
    #[serde(default, deserialize_with = "lossy_i64")]
    pub quantity: i64,

    /// Revenue over the requested range.
    #[serde(default, deserialize_with = "money::lossy_or_zero")]
    pub revenue: Money,
}

fn unknown_product() -> String {
    "Unknown Product".to_string()
}

/// Missing, null, or empty names coerce to the placeholder.
fn name_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(unknown_product))
}

/// Integers that may arrive as numbers, numeric strings, floats, or null.
fn lossy_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(v) => v,
        Raw::Float(v) if v.is_finite() => v.trunc() as i64,
        Raw::Float(_) => 0,
        Raw::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        Raw::Null => 0,
    })
}

// =============================================================================
// Sales Statistics
// =============================================================================

/// Report period selector for `/sales/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatsPeriod {
    Today,
    Week,
    Month,
    /// Explicit start/end dates.
    Custom,
}

impl StatsPeriod {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StatsPeriod::Today => "today",
            StatsPeriod::Week => "week",
            StatsPeriod::Month => "month",
            StatsPeriod::Custom => "custom",
        }
    }
}

/// Sale count and revenue for one bucket (a day, "today", "yesterday").
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeriodStats {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub revenue: Money,
}

/// Per-hour breakdown bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HourlyStats {
    #[serde(default)]
    pub hour: i64,
    #[serde(default)]
    pub sales_count: i64,
    #[serde(default)]
    pub revenue: Money,
}

/// Per-product aggregate used by the dashboard's top-products panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopProduct {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub revenue: Money,
}

/// Aggregate statistics served by `/sales/stats`.
///
/// Every field defaults; a sparse response renders as zeros rather than
/// failing the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesStats {
    #[serde(default)]
    pub today: PeriodStats,
    #[serde(default)]
    pub yesterday: PeriodStats,
    #[serde(default)]
    pub total_sales: i64,
    #[serde(default)]
    pub total_revenue: Money,
    /// Keyed by ISO date ("2025-03-01").
    #[serde(default)]
    pub daily_data: BTreeMap<String, PeriodStats>,
    /// Keyed by hour-of-day as a string ("0".."23").
    #[serde(default)]
    pub hourly_breakdown: BTreeMap<String, HourlyStats>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}

/// One-day rollup served by `/sales/daily-summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySummary {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub total_sales: i64,
    #[serde(default)]
    pub total_revenue: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_strings() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(PaymentMethod::Online.to_string(), "online");
    }

    #[test]
    fn test_sale_status_wire_strings() {
        assert_eq!(SaleStatus::OnHold.as_str(), "on_hold");
        assert_eq!(
            serde_json::from_str::<SaleStatus>("\"on_hold\"").unwrap(),
            SaleStatus::OnHold
        );
    }

    #[test]
    fn test_sale_draft_serializes_wire_shape() {
        let draft = SaleDraft {
            cart_items: vec![SaleItemDraft {
                name: "Hair Serum".to_string(),
                price: Money::from_major(450),
                discount: Money::zero(),
                total: Money::from_major(450),
                product_id: 3,
            }],
            sub_total: Money::from_major(450),
            total_discount: Money::zero(),
            grand_total: Money::from_major(450),
            payment_method: PaymentMethod::Cash,
            notes: Some("Amount tendered: 500".to_string()),
            status: None,
        };

        let v = serde_json::to_value(&draft).unwrap();
        assert_eq!(v["cart_items"][0]["name"], "Hair Serum");
        assert_eq!(v["cart_items"][0]["price"].as_f64(), Some(450.0));
        assert_eq!(v["payment_method"], "cash");
        assert_eq!(v["notes"], "Amount tendered: 500");
        // Hold-only field stays off the wire for regular sales.
        assert!(v.get("status").is_none());
    }

    #[test]
    fn test_sale_deserializes_server_response() {
        let json = r#"{
            "message": "Sale created successfully",
            "sale": {
                "id": 77,
                "invoice_number": "INV-2025-0042",
                "created_at": "2025-03-15T10:30:00Z",
                "status": "completed",
                "sale_items": [
                    {"product_name": "Facial Cleanser", "unit_price": 499.99, "total": 499.99, "product_id": 1}
                ],
                "sub_total": 499.99,
                "total_discount": 0,
                "grand_total": 499.99,
                "payment_method": "cash",
                "notes": "Amount tendered: 500"
            }
        }"#;

        let resp: SaleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.sale.invoice_number, "INV-2025-0042");
        assert_eq!(resp.sale.sale_items[0].unit_price.mils(), 499_990);
        assert_eq!(resp.sale.grand_total.to_string(), "499.990");
        assert_eq!(resp.sale.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_inventory_item_coerces_loose_numerics() {
        let json = r#"{"id": "7", "name": "Hair Serum", "price": "450.00", "quantity": "12", "revenue": 5400}"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.price.mils(), 450_000);
        assert_eq!(item.quantity, 12);
        assert_eq!(item.revenue.mils(), 5_400_000);
    }

    #[test]
    fn test_inventory_item_garbage_becomes_zero_and_unknown() {
        let json = r#"{"id": null, "name": "", "price": "n/a", "quantity": null, "revenue": "x"}"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 0);
        assert_eq!(item.name, "Unknown Product");
        assert!(item.price.is_zero());
        assert_eq!(item.quantity, 0);
        assert!(item.revenue.is_zero());

        // Missing fields entirely.
        let item: InventoryItem = serde_json::from_str("{}").unwrap();
        assert_eq!(item.name, "Unknown Product");
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn test_sales_stats_tolerates_sparse_payload() {
        let stats: SalesStats = serde_json::from_str(r#"{"total_sales": 3}"#).unwrap();
        assert_eq!(stats.total_sales, 3);
        assert_eq!(stats.today.count, 0);
        assert!(stats.total_revenue.is_zero());
        assert!(stats.daily_data.is_empty());

        let json = r#"{
            "today": {"count": 5, "revenue": 1200.5},
            "yesterday": {"count": 4, "revenue": 1000},
            "daily_data": {"2025-03-15": {"count": 5, "revenue": 1200.5}},
            "hourly_breakdown": {"9": {"hour": 9, "sales_count": 2, "revenue": 300}}
        }"#;
        let stats: SalesStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.today.count, 5);
        assert_eq!(stats.today.revenue.mils(), 1_200_500);
        assert_eq!(stats.hourly_breakdown["9"].sales_count, 2);
    }
}
