//! # Receipt Rendering
//!
//! Display data for a completed sale.
//!
//! ## Single Source of Truth
//! A receipt is built from the server-returned sale only. `invoice_number`
//! and `created_at` do not exist on the client until the server assigns
//! them, and the totals shown are the server's echoed figures, never
//! client-recomputed sums.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use zarlette_core::{Money, PaymentMethod, Sale};

use crate::state::AppConfig;

/// A rendered receipt line.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price: Money,
    pub discount: Money,
    pub total: Money,
}

/// Receipt display data.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub store_name: String,
    pub invoice_number: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub sub_total: Money,
    pub total_discount: Money,
    pub grand_total: Money,
    pub payment_method: PaymentMethod,
    /// `Amount tendered: {x}` or `Reference number: {y}` free text.
    pub notes: Option<String>,
    /// Currency symbol for display.
    pub currency_symbol: String,
}

impl Receipt {
    /// Builds the receipt from the server's sale record.
    pub fn from_sale(config: &AppConfig, sale: &Sale) -> Self {
        Receipt {
            store_name: config.store_name.clone(),
            invoice_number: sale.invoice_number.clone(),
            timestamp: sale.created_at,
            lines: sale
                .sale_items
                .iter()
                .map(|item| ReceiptLine {
                    name: item.product_name.clone(),
                    unit_price: item.unit_price,
                    discount: item.discount,
                    total: item.total,
                })
                .collect(),
            sub_total: sale.sub_total,
            total_discount: sale.total_discount,
            grand_total: sale.grand_total,
            payment_method: sale.payment_method,
            notes: sale.notes.clone(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    /// Formats the receipt as plain text for printing.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&center(&self.store_name));
        out.push('\n');
        out.push_str(&format!("Invoice: {}\n", self.invoice_number));
        out.push_str(&format!(
            "Date: {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&rule());

        for line in &self.lines {
            out.push_str(&format!(
                "{:<22}{:>10}\n",
                truncate(&line.name, 22),
                format!("{}{}", self.currency_symbol, line.total)
            ));
            if line.discount.is_positive() {
                out.push_str(&format!(
                    "  (price {}, less {})\n",
                    line.unit_price, line.discount
                ));
            }
        }

        out.push_str(&rule());
        out.push_str(&format!(
            "{:<22}{:>10}\n",
            "Sub Total",
            format!("{}{}", self.currency_symbol, self.sub_total)
        ));
        out.push_str(&format!(
            "{:<22}{:>10}\n",
            "Discount",
            format!("{}{}", self.currency_symbol, self.total_discount)
        ));
        out.push_str(&format!(
            "{:<22}{:>10}\n",
            "Grand Total",
            format!("{}{}", self.currency_symbol, self.grand_total)
        ));
        out.push_str(&rule());
        out.push_str(&format!("Paid by: {}\n", self.payment_method));
        if let Some(notes) = &self.notes {
            out.push_str(notes);
            out.push('\n');
        }
        out.push_str(&center("Thank you!"));
        out.push('\n');

        out
    }
}

const WIDTH: usize = 32;

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= WIDTH {
        return text.to_string();
    }
    format!("{:>width$}", text, width = (WIDTH + len) / 2)
}

fn rule() -> String {
    format!("{}\n", "-".repeat(WIDTH))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use zarlette_core::{SaleItem, SaleStatus};

    fn sale() -> Sale {
        Sale {
            id: 77,
            invoice_number: "INV-2025-0042".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 15, 10, 30, 0).unwrap(),
            status: SaleStatus::Completed,
            sale_items: vec![SaleItem {
                product_name: "Hair Serum".to_string(),
                unit_price: Money::from_major(450),
                discount: Money::from_major(50),
                total: Money::from_major(400),
                product_id: Some(3),
            }],
            sub_total: Money::from_major(450),
            total_discount: Money::from_major(50),
            grand_total: Money::from_major(400),
            payment_method: PaymentMethod::Cash,
            notes: Some("Amount tendered: 500".to_string()),
        }
    }

    #[test]
    fn test_receipt_mirrors_server_sale() {
        let receipt = Receipt::from_sale(&AppConfig::default(), &sale());

        assert_eq!(receipt.store_name, "Zarlette Salon");
        assert_eq!(receipt.invoice_number, "INV-2025-0042");
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].total.to_string(), "400.000");
        // Totals come straight from the server record.
        assert_eq!(receipt.grand_total, Money::from_major(400));
    }

    #[test]
    fn test_render_text_contains_key_fields() {
        let receipt = Receipt::from_sale(&AppConfig::default(), &sale());
        let text = receipt.render_text();

        assert!(text.contains("Zarlette Salon"));
        assert!(text.contains("Invoice: INV-2025-0042"));
        assert!(text.contains("Date: 2025-03-15 10:30"));
        assert!(text.contains("Hair Serum"));
        assert!(text.contains("₱400.000"));
        assert!(text.contains("Amount tendered: 500"));
        assert!(text.contains("Paid by: cash"));
    }
}
