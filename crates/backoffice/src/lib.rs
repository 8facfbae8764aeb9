//! Backoffice: operator toolkit for a shop's admin REST API.
//!
//! The library authenticates an operator, fetches dashboard metrics, and
//! edits rows of any backend table. Edited values are typed by
//! [`record`] coercion before they are sent.
//!
//! # Core Principles
//!
//! - **Explicit session**: the bearer token lives in a [`Session`] handed to
//!   the client, never in global state
//! - **Best-effort typing**: coercion never fails; bad dates become null,
//!   odd numbers stay text
//! - **401 means logged out**: a rejected token is discarded immediately
//!
//! # Example
//!
//! ```
//! use backoffice::record::{CoercedValue, RawRecord, coerce_for_create};
//!
//! let raw = RawRecord::new()
//!     .with("price", "19.99")
//!     .with("isActive", "true")
//!     .with("phoneNumber", "+123456789");
//! let record = coerce_for_create(&raw);
//!
//! assert_eq!(record["price"], CoercedValue::Float(19.99));
//! assert_eq!(record["isActive"], CoercedValue::Bool(true));
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod record;
pub mod session;

mod dashboard;
mod editor;

pub use api::{
    AdminBackend, AdminStats, ApiClient, MockBackend, Order, Period, PeriodStats, PopularProduct,
    TableData, User,
};
pub use config::ClientConfig;
pub use dashboard::{Dashboard, OrderStatus, format_currency, last_login_label, month_label};
pub use editor::TableEditor;
pub use error::{BackofficeError, Result};
pub use record::{CoercedRecord, CoercedValue, RawRecord, coerce_for_create, coerce_for_update};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
