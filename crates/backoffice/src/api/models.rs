//! Wire types of the admin REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Row;

/// Default `limit` for the "top N" / "recent N" endpoints.
pub const DEFAULT_LIMIT: usize = 5;

/// Credentials posted to `/admin/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Token issued by `/admin/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Aggregate dashboard metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_orders: u64,
    pub total_revenue: f64,
    /// Users active in the last 30 days.
    pub active_users: u64,
    pub recent_orders: u64,
    pub average_order_value: f64,
    pub period_stats: Vec<PeriodStats>,
    pub popular_products: Vec<PopularProduct>,
    pub last_24_hours_revenue: f64,
    pub last_week_revenue: f64,
    pub last_month_revenue: f64,
    pub last_24_hours_orders: u64,
    pub last_week_orders: u64,
    pub last_month_orders: u64,
}

/// Revenue and order metrics over one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub average_order_value: f64,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// A product ranked by order volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularProduct {
    pub product_id: i64,
    pub name: String,
    pub order_count: u64,
    pub total_revenue: f64,
}

/// User summary embedded in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUser {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: f64,
    #[serde(default)]
    pub total_bonus: f64,
    #[serde(default)]
    pub used_bonus: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub user: OrderUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub birthday: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Columns and rows of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableData {
    /// Stand-in shown when a table fails to load, so the editor stays usable.
    pub fn placeholder() -> Self {
        Self {
            columns: vec!["id".to_string()],
            rows: Vec::new(),
        }
    }

    /// Find a row by its `id` column.
    pub fn row(&self, id: i64) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| row.get("id").and_then(serde_json::Value::as_i64) == Some(id))
    }
}

/// Window for `/admin/period-stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
}

impl Period {
    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "24h",
            Period::Week => "7d",
            Period::Month => "30d",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "Last 24 Hours",
            Period::Week => "Last 7 Days",
            Period::Month => "Last 30 Days",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "24h" | "day" => Ok(Period::Day),
            "7d" | "week" => Ok(Period::Week),
            "30d" | "month" => Ok(Period::Month),
            _ => Err(format!("Unknown period: {}. Use 24h, 7d, or 30d.", s)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
