//! # Dashboard Commands
//!
//! The landing screen's headline numbers, charts, and top-sellers panel.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use zarlette_core::{
    validation, Money, SaleStatus, SalesStats, StatsPeriod, TopProduct, ValidationError,
};

use crate::error::AppError;
use crate::AppContext;

/// Everything the dashboard renders in one payload.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub date_from: String,
    pub date_to: String,

    pub today_sales: i64,
    pub today_revenue: Money,
    /// Today's revenue vs yesterday's, in percent. Zero when there is no
    /// yesterday baseline to compare against.
    pub trend_percent: f64,

    /// Totals over the selected range.
    pub total_sales: i64,
    pub total_revenue: Money,

    /// Raw aggregates for the charts (daily and hourly breakdowns).
    pub stats: SalesStats,

    /// Top five products by revenue over the same range.
    pub top_products: Vec<TopProduct>,
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

fn trend_percent(today: Money, yesterday: Money) -> f64 {
    if !yesterday.is_positive() {
        return 0.0;
    }
    (today.as_f64() - yesterday.as_f64()) / yesterday.as_f64() * 100.0
}

/// Loads the dashboard for a date range (defaults to the last seven days,
/// today inclusive).
pub async fn load_dashboard(
    ctx: &AppContext,
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<DashboardView, AppError> {
    ctx.session.require()?;
    debug!(?date_from, ?date_to, "load_dashboard command");

    let today = Utc::now().date_naive();
    let date_from = match date_from {
        Some(s) => parse_date("date from", &s)?,
        None => today - Duration::days(6),
    };
    let date_to = match date_to {
        Some(s) => parse_date("date to", &s)?,
        None => today,
    };
    validation::validate_date_range(date_from, date_to)?;
    let (date_from, date_to) = (iso(date_from), iso(date_to));

    let stats = ctx
        .api
        .get_sales_stats(StatsPeriod::Custom, Some(&date_from), Some(&date_to))
        .await?;

    // Top sellers come from the same per-product report the inventory
    // screen uses, so the two screens always agree.
    let mut report = ctx
        .api
        .inventory_report(&date_from, &date_to, SaleStatus::Completed)
        .await?;
    report.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    let top_products = report
        .into_iter()
        .take(5)
        .map(|item| TopProduct {
            product_name: item.name,
            count: item.quantity,
            revenue: item.revenue,
        })
        .collect();

    Ok(DashboardView {
        date_from,
        date_to,
        today_sales: stats.today.count,
        today_revenue: stats.today.revenue,
        trend_percent: trend_percent(stats.today.revenue, stats.yesterday.revenue),
        total_sales: stats.total_sales,
        total_revenue: stats.total_revenue,
        top_products,
        stats,
    })
}
