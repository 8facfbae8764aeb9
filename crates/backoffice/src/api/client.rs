//! Blocking HTTP client for the admin REST API.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{BackofficeError, Result};
use crate::record::CoercedRecord;
use crate::session::Session;

use super::backend::AdminBackend;
use super::models::{
    AdminStats, LoginRequest, LoginResponse, Order, Period, PeriodStats, PopularProduct,
    TableData, User,
};

/// Client for `/admin/...` endpoints.
///
/// The session is passed in explicitly; every request carries its bearer
/// token, and a 401 answer clears it before
/// [`BackofficeError::Unauthorized`] is returned.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
    session: Session,
}

impl ApiClient {
    /// Create a client with an explicit session.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            BackofficeError::Config(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackofficeError::Config(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackofficeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            config,
            session,
        })
    }

    /// Create a client whose session lives in `config.session_file`.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let session = Session::from_file(config.session_file.clone());
        Self::new(config, session)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Exchange credentials for a bearer token and store it in the session.
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.endpoint(&["admin", "login"]);
        debug!(%url, username, "logging in");

        let response = self
            .client
            .post(url)
            .json(&LoginRequest { username, password })
            .send()?;

        if !response.status().is_success() {
            warn!(status = %response.status(), username, "login rejected");
            return Err(BackofficeError::InvalidCredentials);
        }

        let body: LoginResponse = response.json()?;
        self.session.establish(&body.access_token)?;
        info!(username, "admin session established");
        Ok(())
    }

    /// Discard the stored token.
    pub fn logout(&self) -> Result<()> {
        self.session.invalidate()
    }

    /// Base URL joined with percent-encoded path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Always Ok: cannot-be-a-base URLs are rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn endpoint_with_limit(&self, segments: &[&str], limit: usize) -> Url {
        let mut url = self.endpoint(segments);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        url
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token()? {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| BackofficeError::Config(format!("Invalid session token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Send an authenticated request and map the status code.
    fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request.headers(self.build_headers()?).send()?;
        let status = response.status();
        debug!(operation, %status, "admin API response");

        if status == StatusCode::UNAUTHORIZED {
            warn!(operation, "session rejected by server; discarding stored token");
            // The caller must still see the rejection, not the storage error.
            if let Err(e) = self.session.invalidate() {
                warn!(operation, error = %e, "failed to discard stored token");
            }
            return Err(BackofficeError::Unauthorized);
        }

        if !status.is_success() {
            return Err(BackofficeError::Status { operation, status });
        }

        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, operation: &'static str, url: Url) -> Result<T> {
        debug!(operation, %url, "GET");
        let response = self.send(operation, self.client.get(url))?;
        Ok(response.json()?)
    }
}

impl AdminBackend for ApiClient {
    fn admin_stats(&self) -> Result<AdminStats> {
        self.get_json("fetch admin stats", self.endpoint(&["admin", "stats"]))
    }

    fn period_stats(&self, period: Period) -> Result<PeriodStats> {
        let mut url = self.endpoint(&["admin", "period-stats"]);
        url.query_pairs_mut().append_pair("period", period.as_str());
        self.get_json("fetch period stats", url)
    }

    fn monthly_performance(&self) -> Result<Vec<PeriodStats>> {
        self.get_json(
            "fetch monthly performance",
            self.endpoint(&["admin", "monthly-performance"]),
        )
    }

    fn popular_products(&self, limit: usize) -> Result<Vec<PopularProduct>> {
        self.get_json(
            "fetch popular products",
            self.endpoint_with_limit(&["admin", "popular-products"], limit),
        )
    }

    fn recent_orders(&self, limit: usize) -> Result<Vec<Order>> {
        self.get_json(
            "fetch recent orders",
            self.endpoint_with_limit(&["admin", "recent-orders"], limit),
        )
    }

    fn recent_users(&self, limit: usize) -> Result<Vec<User>> {
        self.get_json(
            "fetch recent users",
            self.endpoint_with_limit(&["admin", "recent-users"], limit),
        )
    }

    fn tables(&self) -> Result<Vec<String>> {
        self.get_json("fetch tables", self.endpoint(&["admin", "database", "tables"]))
    }

    fn table_data(&self, table: &str) -> Result<TableData> {
        self.get_json("fetch table data", self.endpoint(&["admin", "database", table]))
    }

    fn create_record(&self, table: &str, record: &CoercedRecord) -> Result<()> {
        let url = self.endpoint(&["admin", "database", table]);
        debug!(%url, fields = record.len(), "POST");
        self.send("create record", self.client.post(url).json(record))?;
        Ok(())
    }

    fn update_record(&self, table: &str, id: i64, record: &CoercedRecord) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&["admin", "database", table, id.as_str()]);
        debug!(%url, fields = record.len(), "PUT");
        self.send("update record", self.client.put(url).json(record))?;
        Ok(())
    }

    fn delete_record(&self, table: &str, id: i64) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&["admin", "database", table, id.as_str()]);
        debug!(%url, "DELETE");
        self.send("delete record", self.client.delete(url))?;
        Ok(())
    }
}
