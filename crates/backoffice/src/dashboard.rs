//! Dashboard snapshot and display helpers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::api::{AdminBackend, AdminStats, Order, Period, PeriodStats, PopularProduct, User};
use crate::error::Result;

/// Everything the dashboard page shows, fetched in one go.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: AdminStats,
    pub period: Period,
    pub period_stats: PeriodStats,
    pub monthly_performance: Vec<PeriodStats>,
    pub popular_products: Vec<PopularProduct>,
    pub recent_orders: Vec<Order>,
    pub recent_users: Vec<User>,
}

impl Dashboard {
    /// Fetch all dashboard sections. Stops at the first failure.
    pub fn fetch<B: AdminBackend + ?Sized>(backend: &B, period: Period, limit: usize) -> Result<Self> {
        debug!(%period, limit, "fetching dashboard");
        Ok(Self {
            stats: backend.admin_stats()?,
            period,
            period_stats: backend.period_stats(period)?,
            monthly_performance: backend.monthly_performance()?,
            popular_products: backend.popular_products(limit)?,
            recent_orders: backend.recent_orders(limit)?,
            recent_users: backend.recent_users(limit)?,
        })
    }
}

/// Order lifecycle state as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Completed,
    Pending,
    Processing,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Case-insensitive parse; unknown values are kept verbatim.
    pub fn parse(status: &str) -> Self {
        match status.to_uppercase().as_str() {
            "COMPLETED" => OrderStatus::Completed,
            "PENDING" => OrderStatus::Pending,
            "PROCESSING" => OrderStatus::Processing,
            "CANCELLED" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(status.to_string()),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Processing => write!(f, "PROCESSING"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
            OrderStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// `$1234.50` style amount with two decimals.
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Calendar date of the last login, or `Never`.
pub fn last_login_label(last_login: Option<DateTime<Utc>>) -> String {
    last_login
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Never".to_string())
}

/// `March 2024` style label for a monthly series entry.
pub fn month_label(stats: &PeriodStats) -> String {
    stats
        .start_date
        .map(|ts| ts.format("%B %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
