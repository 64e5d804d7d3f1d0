//! # Headers and URLs
//!
//! Pure request construction: which headers go out and what URL is hit.
//! Nothing here performs I/O, so every rule is unit tested directly.
//!
//! ## Header Rules
//! ```text
//! header            source                          when
//! ───────────────   ─────────────────────────────   ─────────────────────
//! Content-Type      application/json                always
//! Accept            application/json                always
//! Authorization     Bearer <token>                  token configured
//! X-Tenant-Id       tenant_id                       tenant configured
//! X-Branch-Id       branch_id                       branch configured
//! <any>             extra / RequestOptions          last, overrides above
//! ```

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, ClientResult};

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const BRANCH_HEADER: &str = "x-branch-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const JSON: &str = "application/json";

// =============================================================================
// Header Config
// =============================================================================

/// Everything headers are derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderConfig {
    pub token: Option<String>,
    pub tenant_id: Option<String>,
    pub branch_id: Option<u32>,
    /// Additional headers, applied last.
    pub extra: BTreeMap<String, String>,
}

impl HeaderConfig {
    /// Layers per-request options over this config.
    pub fn merged(&self, options: &RequestOptions) -> HeaderConfig {
        let mut merged = self.clone();
        if let Some(token) = &options.token {
            merged.token = Some(token.clone());
        }
        if let Some(branch_id) = options.branch_id {
            merged.branch_id = Some(branch_id);
        }
        merged
            .extra
            .extend(options.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Per-call overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub token: Option<String>,
    /// Scopes a single call to a branch other than the configured one.
    pub branch_id: Option<u32>,
    pub headers: BTreeMap<String, String>,
    /// Query pairs appended to the URL.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_branch(mut self, branch_id: u32) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Builds the header map for a request.
pub fn build_headers(config: &HeaderConfig) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON));

    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        headers.insert(AUTHORIZATION, header_value("authorization", &format!("Bearer {}", token))?);
    }

    if let Some(tenant) = config.tenant_id.as_deref().filter(|t| !t.is_empty()) {
        headers.insert(HeaderName::from_static(TENANT_HEADER), header_value(TENANT_HEADER, tenant)?);
    }

    if let Some(branch) = config.branch_id {
        headers.insert(
            HeaderName::from_static(BRANCH_HEADER),
            header_value(BRANCH_HEADER, &branch.to_string())?,
        );
    }

    for (name, value) in &config.extra {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        headers.insert(header_name, header_value(name, value)?);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Joins `base` and `path` with exactly one `/` and appends `query`.
///
/// ```rust
/// use bistro_client::headers::build_url;
///
/// let url = build_url("http://localhost:3000/api/", "/staff", &[("role".into(), "Chef Cook".into())]).unwrap();
/// assert_eq!(url.as_str(), "http://localhost:3000/api/staff?role=Chef+Cook");
/// ```
pub fn build_url(base: &str, path: &str, query: &[(String, String)]) -> ClientResult<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)?;

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

/// Flattens a filter struct into query pairs.
///
/// `None` fields are dropped, lists repeat the key. Nested objects are
/// rejected since they have no query-string form.
pub fn query_pairs<T: Serialize>(filter: &T) -> ClientResult<Vec<(String, String)>> {
    let value = serde_json::to_value(filter).map_err(|e| ClientError::Encode(e.to_string()))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ClientError::Encode(format!(
                "query filter must be an object, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(&key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(&key, other)? {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_text(key: &str, value: Value) -> ClientResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ClientError::Encode(format!(
            "query field '{}' is not a scalar",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::format::StockStatus;
    use bistro_core::requests::{InventoryFilter, StaffFilter};

    #[test]
    fn test_default_headers() {
        let headers = build_headers(&HeaderConfig::default()).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), JSON);
        assert_eq!(headers.get(ACCEPT).unwrap(), JSON);
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(TENANT_HEADER).is_none());
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_auth_tenant_branch_headers() {
        let config = HeaderConfig {
            token: Some("abc123".to_string()),
            tenant_id: Some("tenant-42".to_string()),
            branch_id: Some(5),
            ..Default::default()
        };
        let headers = build_headers(&config).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
        assert_eq!(headers.get(TENANT_HEADER).unwrap(), "tenant-42");
        assert_eq!(headers.get(BRANCH_HEADER).unwrap(), "5");
    }

    #[test]
    fn test_empty_token_sends_no_authorization() {
        let config = HeaderConfig {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(build_headers(&config).unwrap().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_request_options_override_config() {
        let config = HeaderConfig {
            token: Some("session".to_string()),
            branch_id: Some(1),
            ..Default::default()
        };
        let options = RequestOptions::new()
            .with_branch(9)
            .with_header("X-Client-Version", "2.4.0")
            .with_header("Accept", "text/csv");

        let headers = build_headers(&config.merged(&options)).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer session");
        assert_eq!(headers.get(BRANCH_HEADER).unwrap(), "9");
        assert_eq!(headers.get("x-client-version").unwrap(), "2.4.0");
        assert_eq!(headers.get(ACCEPT).unwrap(), "text/csv");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = HeaderConfig {
            tenant_id: Some("bad\nvalue".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_headers(&config),
            Err(ClientError::InvalidHeader { .. })
        ));

        let options = RequestOptions::new().with_header("bad header", "x");
        assert!(build_headers(&HeaderConfig::default().merged(&options)).is_err());
    }

    #[test]
    fn test_build_url_single_slash() {
        let url = build_url("http://localhost:3000/api", "staff/7", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/staff/7");

        let url = build_url("http://localhost:3000/api//", "//staff", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/staff");
    }

    #[test]
    fn test_build_url_invalid_base() {
        assert!(matches!(
            build_url("localhost", "/staff", &[]),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_query_pairs_from_filter() {
        assert!(query_pairs(&StaffFilter::default()).unwrap().is_empty());

        let filter = StaffFilter {
            search: Some("ali".to_string()),
            branch_id: Some(3),
            ..Default::default()
        };
        let mut pairs = query_pairs(&filter).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            [
                ("branchId".to_string(), "3".to_string()),
                ("search".to_string(), "ali".to_string())
            ]
        );

        let filter = InventoryFilter {
            status: Some(StockStatus::Medium),
            ..Default::default()
        };
        assert_eq!(
            query_pairs(&filter).unwrap(),
            [("status".to_string(), "Medium".to_string())]
        );
    }

    #[test]
    fn test_query_pairs_repeat_lists() {
        #[derive(Serialize)]
        struct Ids {
            id: Vec<u32>,
        }
        let pairs = query_pairs(&Ids { id: vec![1, 2] }).unwrap();
        assert_eq!(
            pairs,
            [("id".to_string(), "1".to_string()), ("id".to_string(), "2".to_string())]
        );
        assert!(query_pairs(&()).unwrap().is_empty());
    }
}
