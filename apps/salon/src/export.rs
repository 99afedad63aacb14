//! # CSV Export
//!
//! Pure text generation for the inventory sales report. The frontend turns
//! the returned content into a browser download; nothing here touches the
//! filesystem.
//!
//! ## Output Format
//! ```text
//! Product Name,Unit Price,Quantity Sold,Total Revenue
//! "Facial Cleanser",499.99,12,5999.88
//! "Hair Serum",450,8,3600
//!
//! TOTAL,,20,9599.88
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use zarlette_core::{InventoryItem, Money};

/// A ready-to-download CSV document.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    /// `sales_report_{YYYY-MM-DD}.csv`
    pub filename: String,
    pub content: String,
}

/// Footer statistics for the report table.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Distinct products in the report.
    pub product_count: usize,
    /// Σ quantity sold.
    pub total_quantity: i64,
    /// Σ revenue.
    pub total_revenue: Money,
}

impl ReportSummary {
    pub fn from_rows(rows: &[InventoryItem]) -> Self {
        ReportSummary {
            product_count: rows.len(),
            total_quantity: rows.iter().map(|r| r.quantity).sum(),
            total_revenue: rows.iter().map(|r| r.revenue).sum(),
        }
    }
}

/// Case-insensitive name filter over fetched rows.
pub fn filter_rows(rows: &[InventoryItem], term: &str) -> Vec<InventoryItem> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| r.name.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Builds the CSV document for the given rows.
///
/// Product names are double-quoted (they may contain commas); monetary
/// amounts are written as plain major-unit numbers the way the report
/// endpoint delivers them, trailing zeros trimmed.
pub fn build_sales_csv(rows: &[InventoryItem]) -> String {
    let summary = ReportSummary::from_rows(rows);

    let mut csv = String::from("Product Name,Unit Price,Quantity Sold,Total Revenue\n");
    for row in rows {
        csv.push_str(&format!(
            "\"{}\",{},{},{}\n",
            row.name,
            csv_number(row.price),
            row.quantity,
            csv_number(row.revenue)
        ));
    }
    csv.push_str(&format!(
        "\nTOTAL,,{},{}\n",
        summary.total_quantity,
        csv_number(summary.total_revenue)
    ));
    csv
}

/// Filename for an export generated on `date`.
pub fn csv_filename(date: NaiveDate) -> String {
    format!("sales_report_{}.csv", date.format("%Y-%m-%d"))
}

/// Formats money the way the source data looks in a spreadsheet: no fixed
/// decimal padding, `450` rather than `450.000`, `499.99` kept as-is.
fn csv_number(amount: Money) -> String {
    let fixed = amount.to_string();
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, price_mils: i64, quantity: i64, revenue_mils: i64) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: name.to_string(),
            price: Money::from_mils(price_mils),
            quantity,
            revenue: Money::from_mils(revenue_mils),
        }
    }

    #[test]
    fn test_csv_exact_format() {
        let rows = vec![
            row("Facial Cleanser", 499_990, 12, 5_999_880),
            row("Hair Serum", 450_000, 8, 3_600_000),
        ];

        let csv = build_sales_csv(&rows);
        assert_eq!(
            csv,
            "Product Name,Unit Price,Quantity Sold,Total Revenue\n\
             \"Facial Cleanser\",499.99,12,5999.88\n\
             \"Hair Serum\",450,8,3600\n\
             \nTOTAL,,20,9599.88\n"
        );
    }

    #[test]
    fn test_csv_empty_report_still_carries_total_row() {
        let csv = build_sales_csv(&[]);
        assert_eq!(
            csv,
            "Product Name,Unit Price,Quantity Sold,Total Revenue\n\nTOTAL,,0,0\n"
        );
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(csv_filename(date), "sales_report_2025-03-15.csv");
    }

    #[test]
    fn test_summary() {
        let rows = vec![
            row("A", 100_000, 3, 300_000),
            row("B", 50_000, 2, 100_000),
        ];
        let summary = ReportSummary::from_rows(&rows);
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.total_revenue.to_string(), "400.000");
    }

    #[test]
    fn test_filter_rows() {
        let rows = vec![row("Facial Cleanser", 1, 1, 1), row("Hair Serum", 1, 1, 1)];

        assert_eq!(filter_rows(&rows, "").len(), 2);
        assert_eq!(filter_rows(&rows, "serum").len(), 1);
        assert_eq!(filter_rows(&rows, "SERUM")[0].name, "Hair Serum");
        assert!(filter_rows(&rows, "nail").is_empty());
    }
}
