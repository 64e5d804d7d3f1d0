//! # Response Envelope
//!
//! The canonical `ApiResponse<T>` shape and the normalization that maps
//! every backend payload into it.
//!
//! ## Why Normalize at the Boundary?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Backend payload shapes                               │
//! │                                                                         │
//! │  { "success": true, "data": [...] }   ──► Canonical                     │
//! │  [ {...}, {...} ]                     ──► BareArray                     │
//! │  { "id": 1, "name": "Flour" }         ──► BareObject                    │
//! │  <empty body>                         ──► Empty                         │
//! │  "Internal Server Error"              ──► Scalar                        │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  RawEnvelope::decode ──► normalize ──► ApiResponse { data, success,    │
//! │                                                      message }          │
//! │                                                                         │
//! │  Call sites only ever see ApiResponse. The shape is checked once.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Success Rule
//! `success = status is 2xx AND body.success (defaults to true when absent)`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{CoreError, CoreResult};

/// Keys that may appear next to `data` in a canonical envelope. Includes
/// the pagination fields list endpoints send beside the page of records.
const ENVELOPE_KEYS: &[&str] = &[
    "data", "success", "message", "error", "errors", "status", "code", "meta",
    "total", "page", "pageSize", "perPage", "totalPages", "pagination", "links",
];

// =============================================================================
// ApiResponse
// =============================================================================

/// The canonical response envelope every call site works with.
///
/// ## Invariant
/// `success == false` means `data` is not valid. The accessors return
/// `None` for failed responses so a caller cannot use stale data by mistake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        ApiResponse {
            data: Some(data),
            message: None,
            success: true,
        }
    }

    /// A failed response with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            data: None,
            message: Some(message.into()),
            success: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The payload, only when the call succeeded.
    pub fn data(&self) -> Option<&T> {
        if self.success {
            self.data.as_ref()
        } else {
            None
        }
    }

    /// Consumes the response, returning the payload only on success.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Maps the payload, keeping `success` and `message`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: self.data.map(f),
            message: self.message,
            success: self.success,
        }
    }

    /// Converts into a `Result`, turning an application-level failure into
    /// a [`Rejected`] error.
    ///
    /// A success without data is also rejected, since the caller asked
    /// for a `T`.
    pub fn into_result(self) -> Result<T, Rejected> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| "Response contained no data".to_string()),
            }),
            (false, _) => Err(Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            }),
        }
    }
}

impl ApiResponse<Value> {
    /// Decodes the JSON payload into a typed record.
    ///
    /// Failed responses skip decoding: their `data` is dropped.
    /// A successful response with no data decodes from `null`, which
    /// works for `()` and `Option<_>` targets.
    pub fn decode<T: DeserializeOwned>(self) -> CoreResult<ApiResponse<T>> {
        if !self.success {
            return Ok(ApiResponse {
                data: None,
                message: self.message,
                success: false,
            });
        }

        let raw = self.data.unwrap_or(Value::Null);
        let data = serde_json::from_value(raw)
            .map_err(|e| CoreError::InvalidPayload(e.to_string()))?;

        Ok(ApiResponse {
            data: Some(data),
            message: self.message,
            success: true,
        })
    }
}

/// Message used when a failure carries no usable text.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// An application-level failure reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejected {
    pub message: String,
}

// =============================================================================
// Raw Envelope
// =============================================================================

/// A backend payload classified by shape, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEnvelope {
    /// `{ data?, success?, message? }`
    Canonical {
        data: Option<Value>,
        success: Option<bool>,
        message: Option<String>,
        /// Failure text found under `error` / `errors`.
        error: Option<String>,
    },

    /// A top-level JSON array.
    BareArray(Vec<Value>),

    /// A top-level JSON object that is a record, not an envelope.
    BareObject(Map<String, Value>),

    /// No body (`null` or empty).
    Empty,

    /// Any other top-level value (string, number, bool).
    Scalar(Value),
}

impl RawEnvelope {
    /// Classifies a parsed body.
    ///
    /// An object is canonical when it has a boolean `success`, or when it
    /// has `data` and every other key is an envelope key. A record that
    /// happens to have a `data` field next to its own fields stays a
    /// `BareObject`.
    pub fn decode(body: Value) -> Self {
        match body {
            Value::Null => RawEnvelope::Empty,
            Value::Array(items) => RawEnvelope::BareArray(items),
            Value::Object(map) => {
                if is_canonical(&map) {
                    canonical_from_map(map)
                } else {
                    RawEnvelope::BareObject(map)
                }
            }
            Value::String(ref s) if s.trim().is_empty() => RawEnvelope::Empty,
            other => RawEnvelope::Scalar(other),
        }
    }

    /// Normalizes into the canonical envelope for the given HTTP status.
    pub fn normalize(self, status: u16) -> ApiResponse<Value> {
        let status_ok = is_success_status(status);

        let (data, body_success, message, error_text) = match self {
            RawEnvelope::Canonical {
                data,
                success,
                message,
                error,
            } => (data, success, message, error),
            RawEnvelope::BareArray(items) => (Some(Value::Array(items)), None, None, None),
            RawEnvelope::BareObject(map) => {
                // Error bodies are often bare objects: { "error": "..." }
                let error = if status_ok { None } else { error_text_of(&map) };
                (Some(Value::Object(map)), None, None, error)
            }
            RawEnvelope::Empty => (None, None, None, None),
            RawEnvelope::Scalar(value) => {
                let text = match &value {
                    Value::String(s) => Some(s.trim().to_string()),
                    _ => None,
                };
                (Some(value), None, None, text)
            }
        };

        let success = status_ok && body_success.unwrap_or(true);

        if success {
            ApiResponse {
                data: Some(data.unwrap_or(Value::Null)),
                message,
                success: true,
            }
        } else {
            let message = message
                .or(error_text)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback_message(status));
            ApiResponse {
                data: None,
                message: Some(message),
                success: false,
            }
        }
    }
}

/// Maps any backend payload into the canonical `ApiResponse`.
///
/// ```rust
/// use bistro_core::envelope::normalize_api_response;
/// use serde_json::json;
///
/// let res = normalize_api_response(200, json!([1, 2, 3]));
/// assert!(res.success);
/// assert_eq!(res.data, Some(json!([1, 2, 3])));
///
/// let res = normalize_api_response(404, json!({ "message": "Staff not found" }));
/// assert!(!res.success);
/// assert_eq!(res.message.as_deref(), Some("Staff not found"));
/// ```
pub fn normalize_api_response(status: u16, body: Value) -> ApiResponse<Value> {
    RawEnvelope::decode(body).normalize(status)
}

/// True for HTTP 2xx.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

fn fallback_message(status: u16) -> String {
    if is_success_status(status) {
        GENERIC_FAILURE.to_string()
    } else {
        format!("Request failed with status {}", status)
    }
}

fn is_canonical(map: &Map<String, Value>) -> bool {
    if matches!(map.get("success"), Some(Value::Bool(_))) {
        return true;
    }
    map.contains_key("data") && map.keys().all(|k| ENVELOPE_KEYS.contains(&k.as_str()))
}

fn canonical_from_map(mut map: Map<String, Value>) -> RawEnvelope {
    let success = map.get("success").and_then(Value::as_bool);
    let message = map
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    let error = error_text_of(&map);
    let data = map.remove("data").filter(|v| !v.is_null());

    RawEnvelope::Canonical {
        data,
        success,
        message,
        error,
    }
}

/// Pulls a human message out of `error` / `errors`.
///
/// Accepts `"error": "text"`, `"error": { "message": "text" }`,
/// `"errors": ["text", ...]`, `"errors": [{ "message": "text" }]` and
/// `"errors": { "field": ["text"] }`.
fn error_text_of(map: &Map<String, Value>) -> Option<String> {
    if let Some(message) = map.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    match map.get("error") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Object(inner)) => {
            if let Some(s) = inner.get("message").and_then(Value::as_str) {
                return Some(s.to_string());
            }
        }
        _ => {}
    }

    match map.get("errors") {
        Some(Value::Array(items)) => items.first().and_then(text_of),
        Some(Value::Object(fields)) => fields.values().next().and_then(|v| match v {
            Value::Array(items) => items.first().and_then(text_of),
            other => text_of(other),
        }),
        _ => None,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_round_trip_is_unchanged() {
        let body = json!({ "data": { "id": 1, "name": "Flour" }, "success": true });
        let res = normalize_api_response(200, body.clone());
        assert_eq!(serde_json::to_value(&res).unwrap(), body);
    }

    #[test]
    fn test_bare_array_is_wrapped() {
        let res = normalize_api_response(200, json!([1, 2, 3]));
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({ "data": [1, 2, 3], "success": true })
        );
    }

    #[test]
    fn test_bare_object_is_wrapped() {
        let res = normalize_api_response(201, json!({ "id": 9, "name": "Chai" }));
        assert!(res.success);
        assert_eq!(res.data, Some(json!({ "id": 9, "name": "Chai" })));
    }

    #[test]
    fn test_record_with_data_field_stays_bare() {
        let body = json!({ "id": 3, "data": "raw", "label": "x" });
        assert!(matches!(
            RawEnvelope::decode(body),
            RawEnvelope::BareObject(_)
        ));
    }

    #[test]
    fn test_paginated_list_is_canonical() {
        let body = json!({ "data": [{ "id": 1 }, { "id": 2 }], "total": 2, "page": 1 });
        let res = normalize_api_response(200, body);
        assert!(res.success);
        assert_eq!(res.data, Some(json!([{ "id": 1 }, { "id": 2 }])));

        let list: ApiResponse<Vec<Value>> = res.decode().unwrap();
        assert_eq!(list.data().map(Vec::len), Some(2));
    }

    #[test]
    fn test_missing_success_defaults_from_status() {
        let res = normalize_api_response(200, json!({ "data": [] }));
        assert!(res.success);

        let res = normalize_api_response(500, json!({ "data": [] }));
        assert!(!res.success);
        assert_eq!(res.message.as_deref(), Some("Request failed with status 500"));
        assert_eq!(res.data, None);
    }

    #[test]
    fn test_explicit_success_false_on_2xx() {
        let res = normalize_api_response(
            200,
            json!({ "success": false, "message": "Branch is closed" }),
        );
        assert!(!res.success);
        assert_eq!(res.message.as_deref(), Some("Branch is closed"));
        assert_eq!(res.data(), None);
    }

    #[test]
    fn test_non_2xx_overrides_success_true() {
        let res = normalize_api_response(400, json!({ "success": true, "data": 1 }));
        assert!(!res.success);
    }

    #[test]
    fn test_error_message_sources() {
        let res = normalize_api_response(422, json!({ "error": "Name taken" }));
        assert_eq!(res.message.as_deref(), Some("Name taken"));

        let res = normalize_api_response(422, json!({ "errors": ["Price must be positive"] }));
        assert_eq!(res.message.as_deref(), Some("Price must be positive"));

        let res = normalize_api_response(
            422,
            json!({ "errors": { "cnic": ["CNIC already registered"] } }),
        );
        assert_eq!(res.message.as_deref(), Some("CNIC already registered"));

        let res = normalize_api_response(500, json!("Internal Server Error"));
        assert_eq!(res.message.as_deref(), Some("Internal Server Error"));

        let res = normalize_api_response(502, Value::Null);
        assert_eq!(res.message.as_deref(), Some("Request failed with status 502"));
    }

    #[test]
    fn test_empty_success_body() {
        let res = normalize_api_response(204, Value::Null);
        assert!(res.success);
        assert_eq!(res.data, Some(Value::Null));

        let typed: ApiResponse<()> = res.decode().unwrap();
        assert_eq!(typed.into_result(), Ok(()));
    }

    #[test]
    fn test_decode_typed_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Row {
            id: u32,
        }

        let res = normalize_api_response(200, json!([{ "id": 1 }, { "id": 2 }]));
        let typed: ApiResponse<Vec<Row>> = res.decode().unwrap();
        assert_eq!(typed.data().map(Vec::len), Some(2));

        let bad = normalize_api_response(200, json!({ "data": "not rows", "success": true }));
        assert!(matches!(
            bad.decode::<Vec<Row>>(),
            Err(CoreError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_decode_skips_failed_payload() {
        let res = normalize_api_response(404, json!({ "message": "missing" }));
        let typed: ApiResponse<Vec<u32>> = res.decode().unwrap();
        assert!(!typed.success);
        assert_eq!(typed.message(), Some("missing"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::ok(5).into_result(), Ok(5));

        let err = ApiResponse::<u32>::failure("nope").into_result().unwrap_err();
        assert_eq!(err.to_string(), "nope");

        let empty = ApiResponse::<u32> {
            data: None,
            message: None,
            success: true,
        };
        assert!(empty.into_result().is_err());
    }

    #[test]
    fn test_data_hidden_on_failure() {
        let res = ApiResponse {
            data: Some(1),
            message: None,
            success: false,
        };
        assert_eq!(res.data(), None);
        assert_eq!(res.into_data(), None);
    }
}
