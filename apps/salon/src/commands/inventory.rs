//! # Inventory Report Commands
//!
//! The per-product sales report screen and its CSV export.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use zarlette_core::{validation, InventoryItem, SaleStatus, ValidationError};

use crate::error::AppError;
use crate::export::{self, CsvExport, ReportSummary};
use crate::AppContext;

/// The report screen's full payload: rows plus footer totals.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub date_from: String,
    pub date_to: String,
    pub rows: Vec<InventoryItem>,
    pub summary: ReportSummary,
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
        .into()
    })
}

async fn fetch_report(
    ctx: &AppContext,
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<InventoryReport, AppError> {
    // Default range: first of the current month through today.
    let today = Utc::now().date_naive();
    let date_from = match date_from {
        Some(s) => parse_date("date from", &s)?,
        None => today.with_day(1).unwrap_or(today),
    };
    let date_to = match date_to {
        Some(s) => parse_date("date to", &s)?,
        None => today,
    };
    validation::validate_date_range(date_from, date_to)?;
    let (date_from, date_to) = (iso(date_from), iso(date_to));

    let rows = ctx
        .api
        .inventory_report(&date_from, &date_to, SaleStatus::Completed)
        .await?;
    let summary = ReportSummary::from_rows(&rows);

    Ok(InventoryReport {
        date_from,
        date_to,
        rows,
        summary,
    })
}

/// Loads the completed-sales report for a date range (defaults to
/// month-to-date). Only completed sales count.
pub async fn load_inventory_report(
    ctx: &AppContext,
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<InventoryReport, AppError> {
    ctx.session.require()?;
    debug!(?date_from, ?date_to, "load_inventory_report command");

    fetch_report(ctx, date_from, date_to).await
}

/// Narrows report rows by product name, case-insensitively. Client-side
/// only; the fetched range is untouched.
pub fn search_report(report: &InventoryReport, term: &str) -> InventoryReport {
    let rows = export::filter_rows(&report.rows, term);
    let summary = ReportSummary::from_rows(&rows);
    InventoryReport {
        date_from: report.date_from.clone(),
        date_to: report.date_to.clone(),
        rows,
        summary,
    }
}

/// Builds the CSV download for a date range. The data is refetched so the
/// export reflects the server, not a possibly stale screen.
pub async fn export_inventory_csv(
    ctx: &AppContext,
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<CsvExport, AppError> {
    ctx.session.require()?;
    debug!(?date_from, ?date_to, "export_inventory_csv command");

    let report = fetch_report(ctx, date_from, date_to).await?;
    let content = export::build_sales_csv(&report.rows);
    let filename = export::csv_filename(Utc::now().date_naive());
    info!(rows = report.rows.len(), filename = %filename, "Inventory CSV built");

    Ok(CsvExport { filename, content })
}

/// One-click "export today": fresh fetch of today's completed sales.
pub async fn export_today_csv(ctx: &AppContext) -> Result<CsvExport, AppError> {
    ctx.session.require()?;
    debug!("export_today_csv command");

    let today = iso(Utc::now().date_naive());
    export_inventory_csv(ctx, Some(today.clone()), Some(today)).await
}
