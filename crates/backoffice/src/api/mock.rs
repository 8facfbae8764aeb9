//! In-memory backend for tests and offline demos.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::error::{BackofficeError, Result};
use crate::record::{CoercedRecord, ID_FIELD, Row};

use super::backend::AdminBackend;
use super::models::{
    AdminStats, Order, OrderUser, Period, PeriodStats, PopularProduct, TableData, User,
};

/// A write the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockWrite {
    Create {
        table: String,
        record: CoercedRecord,
    },
    Update {
        table: String,
        id: i64,
        record: CoercedRecord,
    },
    Delete {
        table: String,
        id: i64,
    },
}

#[derive(Debug, Default)]
struct MockState {
    tables: IndexMap<String, TableData>,
    failing_tables: HashSet<String>,
    session_expired: bool,
    stats: AdminStats,
    orders: Vec<Order>,
    users: Vec<User>,
    writes: Vec<MockWrite>,
}

/// Backend that keeps tables in memory and records every write.
#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    /// Empty backend with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with the given columns and rows.
    pub fn with_table(self, name: impl Into<String>, columns: &[&str], rows: Vec<Row>) -> Self {
        self.lock().tables.insert(
            name.into(),
            TableData {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows,
            },
        );
        self
    }

    pub fn with_stats(self, stats: AdminStats) -> Self {
        self.lock().stats = stats;
        self
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.lock().orders = orders;
        self
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.lock().users = users;
        self
    }

    /// Make loads of `table` fail with a server error.
    pub fn fail_table(&self, table: &str) {
        self.lock().failing_tables.insert(table.to_string());
    }

    /// Answer every following call as if the token had expired.
    pub fn expire_session(&self) {
        self.lock().session_expired = true;
    }

    /// Writes received so far.
    pub fn writes(&self) -> Vec<MockWrite> {
        self.lock().writes.clone()
    }

    /// A small shop dataset: users, products and orders.
    pub fn demo() -> Self {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single();
        let alice_login = Utc.with_ymd_and_hms(2024, 3, 20, 18, 30, 0).single();

        let users = vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                phone_number: Some("+15550001".to_string()),
                birthday: None,
                created_at: created.unwrap_or_default(),
                last_login_at: alice_login,
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                phone_number: Some("+15550002".to_string()),
                birthday: None,
                created_at: created.unwrap_or_default(),
                last_login_at: None,
            },
        ];

        let orders = vec![Order {
            id: 1,
            user_id: 1,
            total_amount: 42.5,
            total_bonus: 2.0,
            used_bonus: 0.0,
            status: "COMPLETED".to_string(),
            created_at: alice_login.unwrap_or_default(),
            updated_at: alice_login,
            user: OrderUser {
                id: 1,
                name: "Alice".to_string(),
                phone_number: Some("+15550001".to_string()),
            },
        }];

        let products = vec![PopularProduct {
            product_id: 1,
            name: "Espresso".to_string(),
            order_count: 1,
            total_revenue: 42.5,
        }];

        let stats = AdminStats {
            total_users: 2,
            total_orders: 1,
            total_revenue: 42.5,
            active_users: 1,
            recent_orders: 1,
            average_order_value: 42.5,
            popular_products: products,
            last_month_revenue: 42.5,
            last_month_orders: 1,
            ..AdminStats::default()
        };

        Self::new()
            .with_table(
                "users",
                &["id", "name", "phoneNumber", "birthday", "isActive", "createdAt", "updatedAt"],
                vec![
                    row(&[
                        ("id", json!(1)),
                        ("name", json!("Alice")),
                        ("phoneNumber", json!("+15550001")),
                        ("birthday", Value::Null),
                        ("isActive", json!(true)),
                        ("createdAt", json!("2024-03-01T09:00:00.000Z")),
                        ("updatedAt", json!("2024-03-01T09:00:00.000Z")),
                    ]),
                    row(&[
                        ("id", json!(2)),
                        ("name", json!("Bob")),
                        ("phoneNumber", json!("+15550002")),
                        ("birthday", json!("1990-05-17T00:00:00.000Z")),
                        ("isActive", json!(false)),
                        ("createdAt", json!("2024-03-01T09:00:00.000Z")),
                        ("updatedAt", json!("2024-03-01T09:00:00.000Z")),
                    ]),
                ],
            )
            .with_table(
                "products",
                &["id", "name", "price", "stock"],
                vec![row(&[
                    ("id", json!(1)),
                    ("name", json!("Espresso")),
                    ("price", json!(2.5)),
                    ("stock", json!(120)),
                ])],
            )
            .with_table(
                "orders",
                &["id", "userId", "totalAmount", "status", "createdAt"],
                vec![row(&[
                    ("id", json!(1)),
                    ("userId", json!(1)),
                    ("totalAmount", json!(42.5)),
                    ("status", json!("COMPLETED")),
                    ("createdAt", json!("2024-03-20T18:30:00.000Z")),
                ])],
            )
            .with_stats(stats)
            .with_orders(orders)
            .with_users(users)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Lock the state, failing first if the session has been expired.
    fn authorized(&self) -> Result<MutexGuard<'_, MockState>> {
        let state = self.lock();
        if state.session_expired {
            return Err(BackofficeError::Unauthorized);
        }
        Ok(state)
    }
}

/// Build a row keeping column order.
pub fn row(fields: &[(&str, Value)]) -> Row {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn not_found(operation: &'static str) -> BackofficeError {
    BackofficeError::Status {
        operation,
        status: StatusCode::NOT_FOUND,
    }
}

fn row_id(row: &Row) -> Option<i64> {
    row.get(ID_FIELD).and_then(Value::as_i64)
}

impl AdminBackend for MockBackend {
    fn admin_stats(&self) -> Result<AdminStats> {
        Ok(self.authorized()?.stats.clone())
    }

    fn period_stats(&self, period: Period) -> Result<PeriodStats> {
        let state = self.authorized()?;
        let stats = &state.stats;
        let (revenue, order_count) = match period {
            Period::Day => (stats.last_24_hours_revenue, stats.last_24_hours_orders),
            Period::Week => (stats.last_week_revenue, stats.last_week_orders),
            Period::Month => (stats.last_month_revenue, stats.last_month_orders),
        };
        let average_order_value = if order_count == 0 {
            0.0
        } else {
            revenue / order_count as f64
        };

        Ok(PeriodStats {
            revenue,
            order_count,
            average_order_value,
            start_date: None,
            end_date: None,
        })
    }

    fn monthly_performance(&self) -> Result<Vec<PeriodStats>> {
        Ok(self.authorized()?.stats.period_stats.clone())
    }

    fn popular_products(&self, limit: usize) -> Result<Vec<PopularProduct>> {
        let state = self.authorized()?;
        Ok(state.stats.popular_products.iter().take(limit).cloned().collect())
    }

    fn recent_orders(&self, limit: usize) -> Result<Vec<Order>> {
        Ok(self.authorized()?.orders.iter().take(limit).cloned().collect())
    }

    fn recent_users(&self, limit: usize) -> Result<Vec<User>> {
        Ok(self.authorized()?.users.iter().take(limit).cloned().collect())
    }

    fn tables(&self) -> Result<Vec<String>> {
        Ok(self.authorized()?.tables.keys().cloned().collect())
    }

    fn table_data(&self, table: &str) -> Result<TableData> {
        let state = self.authorized()?;
        if state.failing_tables.contains(table) {
            return Err(BackofficeError::Status {
                operation: "fetch table data",
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        state
            .tables
            .get(table)
            .cloned()
            .ok_or_else(|| not_found("fetch table data"))
    }

    fn create_record(&self, table: &str, record: &CoercedRecord) -> Result<()> {
        let mut state = self.authorized()?;
        let data = state
            .tables
            .get_mut(table)
            .ok_or_else(|| not_found("create record"))?;

        let next_id = data.rows.iter().filter_map(row_id).max().unwrap_or(0) + 1;
        let mut new_row: Row = record
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        if !new_row.get(ID_FIELD).is_some_and(Value::is_i64) {
            new_row.insert(ID_FIELD.to_string(), json!(next_id));
        }
        data.rows.push(new_row);

        state.writes.push(MockWrite::Create {
            table: table.to_string(),
            record: record.clone(),
        });
        Ok(())
    }

    fn update_record(&self, table: &str, id: i64, record: &CoercedRecord) -> Result<()> {
        let mut state = self.authorized()?;
        let existing = state
            .tables
            .get_mut(table)
            .and_then(|data| data.rows.iter_mut().find(|r| row_id(r) == Some(id)))
            .ok_or_else(|| not_found("update record"))?;

        for (name, value) in record {
            existing.insert(name.clone(), value.to_json());
        }

        state.writes.push(MockWrite::Update {
            table: table.to_string(),
            id,
            record: record.clone(),
        });
        Ok(())
    }

    fn delete_record(&self, table: &str, id: i64) -> Result<()> {
        let mut state = self.authorized()?;
        let data = state
            .tables
            .get_mut(table)
            .ok_or_else(|| not_found("delete record"))?;

        let before = data.rows.len();
        data.rows.retain(|r| row_id(r) != Some(id));
        if data.rows.len() == before {
            return Err(not_found("delete record"));
        }

        state.writes.push(MockWrite::Delete {
            table: table.to_string(),
            id,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CoercedValue;

    #[test]
    fn test_demo_tables() {
        let backend = MockBackend::demo();
        assert_eq!(backend.tables().unwrap(), vec!["users", "products", "orders"]);
        assert_eq!(backend.table_data("users").unwrap().rows.len(), 2);
    }

    #[test]
    fn test_create_assigns_id() {
        let backend = MockBackend::demo();
        let mut record = CoercedRecord::new();
        record.insert("name".to_string(), CoercedValue::Text("Latte".to_string()));
        backend.create_record("products", &record).unwrap();

        let data = backend.table_data("products").unwrap();
        assert_eq!(data.row(2).and_then(|r| r.get("name")), Some(&json!("Latte")));
    }

    #[test]
    fn test_expired_session() {
        let backend = MockBackend::demo();
        backend.expire_session();
        assert!(matches!(backend.tables(), Err(BackofficeError::Unauthorized)));
    }

    #[test]
    fn test_period_average() {
        let backend = MockBackend::new().with_stats(AdminStats {
            last_week_revenue: 90.0,
            last_week_orders: 3,
            ..AdminStats::default()
        });
        let week = backend.period_stats(Period::Week).unwrap();
        assert_eq!(week.average_order_value, 30.0);
        assert_eq!(backend.period_stats(Period::Day).unwrap().average_order_value, 0.0);
    }
}
