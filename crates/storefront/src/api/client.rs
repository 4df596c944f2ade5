//! HTTP client for the backend CRUD API.
//!
//! The storefront owns no database. Accounts, catalog, and promotions all
//! live behind a separate CRUD service, reached over plain REST. Lookups
//! are deliberately forgiving: a non-success status on a by-phone lookup
//! is logged and treated as "not found", so a misbehaving backend degrades
//! to a failed login instead of a 500.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use pocketwave_core::Phone;

use super::types::{Customer, Employee, NewCustomer, ProductImage, ProductVariant, Promotion};

/// Timeout for account lookups and writes.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tighter timeout for catalog listings. Listings block page renders and
/// every caller has a fallback, so failing fast beats hanging.
const LISTING_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned by the backend API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend answered 2xx but the body did not parse.
    #[error("failed to parse backend response: {0}")]
    Parse(String),
}

/// Client for the backend CRUD API.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client against the given base URL (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a customer account by phone number.
    ///
    /// Returns `Ok(None)` when the backend answers with any non-success
    /// status, not just 404.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` on network failure and `ApiError::Parse`
    /// when a 2xx body does not deserialize.
    pub async fn find_customer_by_phone(&self, phone: &Phone) -> Result<Option<Customer>, ApiError> {
        let url = format!("{}/api/Customer/phone/{phone}", self.base_url);
        self.fetch_optional(&url, "customer").await
    }

    /// Look up a staff account by phone number.
    ///
    /// Same contract as [`Self::find_customer_by_phone`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` on network failure and `ApiError::Parse`
    /// when a 2xx body does not deserialize.
    pub async fn find_employee_by_phone(&self, phone: &Phone) -> Result<Option<Employee>, ApiError> {
        let url = format!("{}/api/Employee/phone/{phone}", self.base_url);
        self.fetch_optional(&url, "employee").await
    }

    /// Create a customer account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with a human-readable message distilled from
    /// the error body when the backend rejects the account (duplicate phone,
    /// validation failure), or `ApiError::Http` on network failure.
    pub async fn create_customer(&self, new_customer: &NewCustomer) -> Result<(), ApiError> {
        let url = format!("{}/api/Customer", self.base_url);
        let response = self.client.post(&url).json(new_customer).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: parse_error_body(status.as_u16(), &body),
            });
        }
        Ok(())
    }

    /// Fetch every product variant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` on a non-success status, `ApiError::Http` on
    /// network failure, or `ApiError::Parse` on a malformed body.
    pub async fn list_variants(&self) -> Result<Vec<ProductVariant>, ApiError> {
        self.fetch_list("ProductVariant").await
    }

    /// Fetch every product image.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::list_variants`].
    pub async fn list_images(&self) -> Result<Vec<ProductImage>, ApiError> {
        self.fetch_list("Image").await
    }

    /// Fetch every promotion campaign.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::list_variants`].
    pub async fn list_promotions(&self) -> Result<Vec<Promotion>, ApiError> {
        self.fetch_list("Promotion").await
    }

    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<Option<T>, ApiError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                what,
                "backend lookup returned non-success, treating as not found"
            );
            return Ok(None);
        }

        let found = response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(Some(found))
    }

    async fn fetch_list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, ApiError> {
        let url = format!("{}/api/{resource}", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(LISTING_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Distill a backend error body into a single human-readable message.
///
/// The backend is not consistent about error shapes. Forms are tried in
/// order:
/// 1. `{"message": "..."}`
/// 2. `{"errors": ["...", ...]}`
/// 3. `{"errors": {"field": ["...", ...]}}` (ASP.NET-style model validation)
/// 4. anything else passes through verbatim with the status code
fn parse_error_body(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }

        if let Some(errors) = value.get("errors") {
            let collected: Vec<&str> = match errors {
                serde_json::Value::Array(items) => {
                    items.iter().filter_map(|item| item.as_str()).collect()
                }
                serde_json::Value::Object(fields) => fields
                    .values()
                    .filter_map(|field_errors| field_errors.as_array())
                    .flatten()
                    .filter_map(|item| item.as_str())
                    .collect(),
                _ => Vec::new(),
            };
            if !collected.is_empty() {
                return collected.join("; ");
            }
        }
    }

    format!("backend returned HTTP {status}: {body}")
}
