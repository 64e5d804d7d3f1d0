//! # API Client
//!
//! The single place HTTP requests are issued.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  service call                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_url + build_headers (pure)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reqwest send ──── no response ───► Err(ClientError::Network)          │
//! │       │                                                                 │
//! │       ▼ status + body                                                   │
//! │  normalize_api_response (bistro-core)                                   │
//! │       │                                                                 │
//! │       ├── success: false ─────────► Ok(ApiResponse { success: false }) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  decode data into T ─── mismatch ─► Err(ClientError::Decode)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(ApiResponse { data: Some(T), success: true })                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One call is one request. There are no retries and no cache.

use std::time::Instant;

use bistro_core::envelope::{normalize_api_response, ApiResponse};
use reqwest::header::HeaderValue;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::headers::{build_headers, build_url, query_pairs, HeaderConfig, RequestOptions, REQUEST_ID_HEADER};

/// HTTP client for the backend API.
///
/// Cheap to clone; clones share the connection pool.
///
/// ## Usage
/// ```rust,ignore
/// let client = ApiClient::new(&ClientConfig::load_or_default(None))?;
///
/// let staff: ApiResponse<Vec<StaffItem>> = client.get("/staff").await?;
/// if let Some(list) = staff.data() {
///     // render
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderConfig,
}

impl ApiClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        info!(base_url = %config.api.base_url, "API client created");

        Ok(ApiClient {
            http,
            base_url: config.api.base_url.clone(),
            headers: config.header_config(),
        })
    }

    /// Creates a client for `base_url` with every other setting at its default.
    pub fn with_base_url(base_url: impl Into<String>) -> ClientResult<Self> {
        let mut config = ClientConfig::default();
        config.api.base_url = base_url.into();
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Header inputs applied to every request.
    pub fn header_config(&self) -> &HeaderConfig {
        &self.headers
    }

    /// Replaces the bearer token, e.g. after login or logout.
    pub fn set_token(&mut self, token: Option<String>) {
        self.headers.token = token;
    }

    /// Sets the branch sent with every request.
    pub fn set_branch(&mut self, branch_id: Option<u32>) {
        self.headers.branch_id = branch_id;
    }

    // =========================================================================
    // Core Request
    // =========================================================================

    /// Sends one request and normalizes the response.
    ///
    /// ## Returns
    /// - `Ok(ApiResponse { success: true, data: Some(T) })` on success
    /// - `Ok(ApiResponse { success: false, message })` when the backend
    ///   answered but refused
    /// - `Err(ClientError::Network)` when no response was received
    /// - `Err(ClientError::Decode)` when the data does not fit `T`
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> ClientResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let default_options = RequestOptions::default();
        let options = options.unwrap_or(&default_options);

        let url = build_url(&self.base_url, path, &options.query)?;
        let mut headers = build_headers(&self.headers.merged(options))?;

        let request_id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }

        let mut builder = self.http.request(method.clone(), url).headers(headers);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| ClientError::Encode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        debug!(%method, path, %request_id, "Sending API request");
        let started = Instant::now();

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, path, %request_id, error = %e, "API request failed without response");
                return Err(ClientError::from(e));
            }
        };

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(ClientError::Network)?;
        let normalized = normalize_api_response(status, parse_body(&bytes));

        info!(
            %method,
            path,
            status,
            success = normalized.success,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API request completed"
        );

        Ok(normalized.decode()?)
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        self.request::<T, Value>(Method::GET, path, None, None).await
    }

    /// GET with a filter serialized into the query string.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let options = RequestOptions::new().with_query(query_pairs(&query)?);
        self.request::<T, Value>(Method::GET, path, None, Some(&options))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), None).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        self.request::<T, Value>(Method::DELETE, path, None, None)
            .await
    }
}

/// Parses a response body, keeping non-JSON text as a string so error
/// pages still produce a message.
fn parse_body(bytes: &[u8]) -> Value {
    let text = String::from_utf8_lossy(bytes);
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(text.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b""), Value::Null);
        assert_eq!(parse_body(b"  \n"), Value::Null);
        assert_eq!(parse_body(br#"{"success":true}"#), json!({ "success": true }));
        assert_eq!(
            parse_body(b"Bad Gateway"),
            Value::String("Bad Gateway".to_string())
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(ApiClient::new(&config).is_err());
        assert!(ApiClient::with_base_url("ftp://files.example.com").is_err());
    }

    #[test]
    fn test_token_and_branch_setters() {
        let mut client = ApiClient::with_base_url("http://localhost:3000/api").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");

        client.set_token(Some("abc".to_string()));
        client.set_branch(Some(4));
        assert_eq!(client.header_config().token.as_deref(), Some("abc"));
        assert_eq!(client.header_config().branch_id, Some(4));
    }
}
