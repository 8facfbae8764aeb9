//! Admin REST API access.
//!
//! [`ApiClient`] talks HTTP to the shop backend; [`MockBackend`] keeps
//! everything in memory. Both implement [`AdminBackend`], which is what the
//! [`TableEditor`](crate::TableEditor) and [`Dashboard`](crate::Dashboard)
//! are written against.
//!
//! # Example
//!
//! ```no_run
//! use backoffice::{AdminBackend, ApiClient, ClientConfig};
//!
//! let client = ApiClient::from_config(ClientConfig::from_env()?)?;
//! client.login("admin", "secret")?;
//! for table in client.tables()? {
//!     println!("{}", table);
//! }
//! # Ok::<(), backoffice::BackofficeError>(())
//! ```

mod backend;
mod client;
mod mock;
mod models;

pub use backend::AdminBackend;
pub use client::ApiClient;
pub use mock::{MockBackend, MockWrite, row};
pub use models::{
    AdminStats, DEFAULT_LIMIT, LoginRequest, LoginResponse, Order, OrderUser, Period, PeriodStats,
    PopularProduct, TableData, User,
};
