//! # Storefront Client
//!
//! Async HTTP client for the catalog and auth APIs.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      StorefrontClient                                   │
//! │                                                                         │
//! │  get_products() ──► GET {catalog}/products ──┐                          │
//! │  get_categories() ► GET {catalog}/category ──┼─► Envelope<T>            │
//! │  get_product(id) ─► catalog fetch + filter   │   │                      │
//! │                                              │   ├─ !success → Api      │
//! │  login() ─────────► POST {auth}/auth/login ──┤   ├─ no data  → Api      │
//! │  register() ──────► POST {auth}/auth/register│   └─ data ─► validate ─► │
//! │  change_password()► PUT  {auth}/auth/        │              domain type │
//! │                          change-password     │                          │
//! └──────────────────────────────────────────────┴──────────────────────────┘
//! ```
//!
//! Catalog responses are converted to domain types entry by entry; a
//! malformed entry is logged and skipped rather than failing the whole
//! fetch. Requests are single-shot, with no retry layer.

use std::time::Duration;

use tracing::{debug, warn};

use harvest_core::types::{Category, Product};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::schema::{
    ApiMessage, ChangePasswordRequest, Envelope, LoginRequest, LoginResponse, RawCategory,
    RawProduct, RegisterRequest,
};

// =============================================================================
// Client
// =============================================================================

/// Client for the remote storefront APIs.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl StorefrontClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()?;

        Ok(StorefrontClient { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn catalog_url(&self, path: &str) -> String {
        join_url(&self.config.catalog.base_url, path)
    }

    fn auth_url(&self, path: &str) -> String {
        join_url(&self.config.auth.base_url, path)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetches the full product catalog as typed domain products.
    ///
    /// Categories are fetched first so each product carries a resolved
    /// category name. Entries that fail validation are skipped with a
    /// warning.
    pub async fn get_products(&self) -> ApiResult<Vec<Product>> {
        let categories = self.get_categories().await?;

        let url = self.catalog_url("products");
        let raw: Vec<RawProduct> = self.fetch_envelope(&url).await?;

        let total = raw.len();
        let products: Vec<Product> = raw
            .into_iter()
            .filter_map(|entry| {
                let id = entry.id.clone();
                match entry.into_product(&categories) {
                    Ok(product) => Some(product),
                    Err(err) => {
                        warn!(product_id = %id, error = %err, "Skipping malformed catalog entry");
                        None
                    }
                }
            })
            .collect();

        debug!(
            fetched = total,
            accepted = products.len(),
            "Fetched product catalog"
        );

        Ok(products)
    }

    /// Fetches the category list.
    ///
    /// Malformed entries are skipped with a warning.
    pub async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        let url = self.catalog_url("category");
        let raw: Vec<RawCategory> = self.fetch_envelope(&url).await?;

        let categories: Vec<Category> = raw
            .into_iter()
            .filter_map(|entry| {
                let id = entry.id.clone();
                match entry.into_category() {
                    Ok(category) => Some(category),
                    Err(err) => {
                        warn!(category_id = %id, error = %err, "Skipping malformed category entry");
                        None
                    }
                }
            })
            .collect();

        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// Fetches a single product by id.
    ///
    /// The catalog API exposes no per-product endpoint, so this fetches
    /// the catalog and filters client-side.
    pub async fn get_product(&self, id: &str) -> ApiResult<Product> {
        let products = self.get_products().await?;

        products
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::ProductNotFound(id.to_string()))
    }

    /// GETs `url` and unwraps the `{success, data}` envelope.
    async fn fetch_envelope<T>(&self, url: &str) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(%url, "Fetching");

        let envelope: Envelope<T> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "server reported failure".to_string());
            return Err(ApiError::Api(message));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Api("success response carried no data".to_string()))
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Logs in and returns the session token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let url = self.auth_url("auth/login");
        debug!(%url, %email, "Logging in");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Auth(auth_failure_message(response).await));
        }

        let body: LoginResponse = response.json().await?;
        Ok(body.token)
    }

    /// Registers a new account.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<()> {
        let url = self.auth_url("auth/register");
        debug!(%url, %email, "Registering account");

        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Auth(auth_failure_message(response).await));
        }

        Ok(())
    }

    /// Changes the password for the account behind `token`.
    ///
    /// The token is sent verbatim as the `Authorization` header value,
    /// with no scheme prefix.
    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> ApiResult<()> {
        let url = self.auth_url("auth/change-password");
        debug!(%url, "Changing password");

        let response = self
            .http
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, token)
            .json(&ChangePasswordRequest {
                old_password: old_password.to_string(),
                new_password: new_password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Auth(auth_failure_message(response).await));
        }

        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Joins a base URL and a path with exactly one slash between them.
fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Extracts the server's failure message from a non-2xx auth response,
/// falling back to the status line when the body is unreadable.
async fn auth_failure_message(response: reqwest::Response) -> String {
    let status = response.status();

    match response.json::<ApiMessage>().await {
        Ok(ApiMessage {
            message: Some(message),
        }) => message,
        _ => format!("server returned {status}"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
