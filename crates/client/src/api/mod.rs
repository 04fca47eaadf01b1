//! Saahaz backend REST API client.
//!
//! Uses `reqwest` for HTTP and caches catalog reads with `moka` (5-minute
//! TTL). The backend is the source of truth - no local sync, direct calls.
//! Cart state is never cached; it lives client-side in [`crate::store`].
//!
//! Backend error payloads carry a `detail` field; it is passed through
//! verbatim so the calling surface decides how to render it.

pub mod types;

mod cache;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use saahaz_core::{CategoryId, OrderId, OrderStatus, ProductId};

use cache::{CacheKey, CacheValue};
use types::{
    AuthResponse, Category, CategoryInput, Order, OrderCreate, Product, ProductFilter,
    ProductInput, ProfileUpdate, RegisterRequest, User,
};

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, etc).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend rejected the request as invalid (400). The detail is the
    /// backend's own message, passed through verbatim.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential missing, expired, or invalid (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller lacks permission, e.g. non-admin on an admin endpoint (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success response.
    #[error("Backend error (HTTP {status}): {detail}")]
    Backend { status: u16, detail: String },
}

/// Client for the Saahaz backend REST API.
///
/// Cheap to clone; the bearer credential is shared across clones, matching
/// the single-process session model.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<SecretString>>,
    cache: Cache<CacheKey, CacheValue>,
}

impl ApiClient {
    /// Create a new API client for the given backend origin.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                token: RwLock::new(None),
                cache,
            }),
        }
    }

    /// Attach a bearer credential to all subsequent requests.
    pub fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = Some(SecretString::from(token.to_owned()));
        }
    }

    /// Drop the bearer credential; subsequent requests are anonymous.
    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = None;
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    fn bearer(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.expose_secret().to_owned()))
    }

    /// Send a request and decode the JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            let detail = extract_detail(&text);
            debug!(status = %status, detail = %detail, "Backend returned non-success status");
            return Err(match status.as_u16() {
                400 => ApiError::Validation(detail),
                401 => ApiError::Unauthorized(detail),
                403 => ApiError::Forbidden(detail),
                404 => ApiError::NotFound(detail),
                code => ApiError::Backend {
                    status: code,
                    detail,
                },
            });
        }

        serde_json::from_str(&text).map_err(ApiError::Parse)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.inner.client.get(self.endpoint(path)))
            .await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.inner.client.post(self.endpoint(path)).json(body))
            .await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.inner.client.put(self.endpoint(path)).json(body))
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.inner.client.delete(self.endpoint(path)))
            .await
    }

    // =========================================================================
    // Auth & Profile
    // =========================================================================

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for bad credentials; other failures
    /// pass through as-is.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        self.post("auth/login", &LoginRequest { email, password })
            .await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the email is already registered.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("auth/register", request).await
    }

    /// Fetch the current user's profile. Requires a bearer credential; used
    /// both by account pages and to validate a persisted credential at
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the credential is missing or
    /// expired.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get("profile").await
    }

    /// Update the current user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the caller is anonymous.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.put("profile", update).await
    }

    // =========================================================================
    // Catalog (cached reads)
    // =========================================================================

    /// List products, optionally filtered by category or featured flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let cache_key = CacheKey::Products(filter.clone());
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let mut path = String::from("products");
        let mut params = Vec::new();
        if let Some(category_id) = &filter.category_id {
            params.push(format!("category_id={category_id}"));
        }
        if let Some(featured) = filter.featured {
            params.push(format!("featured={featured}"));
        }
        if !params.is_empty() {
            path = format!("{path}?{}", params.join("&"));
        }

        let products: Vec<Product> = self.get(&path).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn product(&self, product_id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = CacheKey::Product(product_id.clone());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get(&format!("products/{product_id}")).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get("categories").await?;

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Admin catalog writes (invalidate cached reads)
    // =========================================================================

    /// Create a product (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for non-admin callers.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let product = self.post("products", input).await?;
        self.invalidate_catalog();
        Ok(product)
    }

    /// Update a product (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self, input), fields(product_id = %product_id))]
    pub async fn update_product(
        &self,
        product_id: &ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        let product = self.put(&format!("products/{product_id}"), input).await?;
        self.invalidate_catalog();
        Ok(product)
    }

    /// Delete a product (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: &ProductId) -> Result<(), ApiError> {
        let _: types::Message = self.delete(&format!("products/{product_id}")).await?;
        self.invalidate_catalog();
        Ok(())
    }

    /// Create a category (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for non-admin callers.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let category = self.post("categories", input).await?;
        self.invalidate_catalog();
        Ok(category)
    }

    /// Update a category (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the category does not exist.
    #[instrument(skip(self, input), fields(category_id = %category_id))]
    pub async fn update_category(
        &self,
        category_id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        let category = self.put(&format!("categories/{category_id}"), input).await?;
        self.invalidate_catalog();
        Ok(category)
    }

    /// Delete a category (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the category does not exist.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn delete_category(&self, category_id: &CategoryId) -> Result<(), ApiError> {
        let _: types::Message = self.delete(&format!("categories/{category_id}")).await?;
        self.invalidate_catalog();
        Ok(())
    }

    // =========================================================================
    // Orders (not cached - mutable state)
    // =========================================================================

    /// Submit a checkout order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if an item references a product the
    /// backend no longer has; validation errors pass through verbatim.
    #[instrument(skip(self, order), fields(item_count = order.items.len()))]
    pub async fn create_order(&self, order: &OrderCreate) -> Result<Order, ApiError> {
        self.post("orders", order).await
    }

    /// List orders: own orders for customers, all orders for admins (the
    /// backend scopes by the credential; nothing is enforced client-side).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the caller is anonymous.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("orders").await
    }

    /// Set an order's status (admin). Legality of the transition is the
    /// backend's concern.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let path = format!("orders/{order_id}/status?status={status}");
        let _: types::Message = self
            .execute(self.inner.client.put(self.endpoint(&path)))
            .await?;
        Ok(())
    }

    /// Invalidate all cached catalog data.
    fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
    }
}

/// Pull the backend's `detail` message out of an error body, falling back to
/// the raw (truncated) body when it is not the expected JSON shape.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|d| d.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_from_backend_error() {
        assert_eq!(
            extract_detail("{\"detail\":\"Invalid credentials\"}"),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_extract_detail_falls_back_to_body() {
        assert_eq!(extract_detail("<html>bad gateway</html>"), "<html>bad gateway</html>");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let url = "http://localhost:8001/api/".parse::<Url>().expect("url");
        let client = ApiClient::new(&url);
        assert_eq!(
            client.endpoint("auth/login"),
            "http://localhost:8001/api/auth/login"
        );
    }
}
