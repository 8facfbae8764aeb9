//! Backend trait shared by the HTTP client and the in-memory mock.

use crate::error::Result;
use crate::record::CoercedRecord;

use super::models::{AdminStats, Order, Period, PeriodStats, PopularProduct, TableData, User};

/// Authenticated admin operations.
///
/// Implementations must be thread-safe (Send + Sync). Any implementation
/// reports a rejected session as
/// [`BackofficeError::Unauthorized`](crate::BackofficeError::Unauthorized).
pub trait AdminBackend: Send + Sync {
    /// Aggregate dashboard metrics.
    fn admin_stats(&self) -> Result<AdminStats>;

    /// Revenue/order metrics for one window.
    fn period_stats(&self, period: Period) -> Result<PeriodStats>;

    /// Per-month revenue/order series.
    fn monthly_performance(&self) -> Result<Vec<PeriodStats>>;

    /// Top-`limit` products by order volume.
    fn popular_products(&self, limit: usize) -> Result<Vec<PopularProduct>>;

    /// Most recent `limit` orders, each with its user summary.
    fn recent_orders(&self, limit: usize) -> Result<Vec<Order>>;

    /// Most recent `limit` users.
    fn recent_users(&self, limit: usize) -> Result<Vec<User>>;

    /// Names of the editable tables.
    fn tables(&self) -> Result<Vec<String>>;

    /// Columns and rows of `table`.
    fn table_data(&self, table: &str) -> Result<TableData>;

    /// Insert a row built by [`coerce_for_create`](crate::record::coerce_for_create).
    fn create_record(&self, table: &str, record: &CoercedRecord) -> Result<()>;

    /// Update row `id` with a record built by
    /// [`coerce_for_update`](crate::record::coerce_for_update).
    fn update_record(&self, table: &str, id: i64, record: &CoercedRecord) -> Result<()>;

    /// Delete row `id`.
    fn delete_record(&self, table: &str, id: i64) -> Result<()>;
}
