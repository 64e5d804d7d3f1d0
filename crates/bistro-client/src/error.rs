//! # Client Error Types
//!
//! Error types for API calls and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Application         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Api (success: false)   │ │
//! │  │  InvalidUrl     │  │  (no response)  │  │  Validation (not sent)  │ │
//! │  │  ConfigLoad/Save│  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  A request that reached the backend and was refused is NOT an error    │
//! │  at the transport level: `request` returns Ok(ApiResponse { success:   │
//! │  false, .. }). `Api` only appears once a caller asks for the data.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bistro_core::envelope::Rejected;
use bistro_core::{CoreError, FieldErrors};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every way a client call can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Base URL or resource path could not form a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A configured header value is not valid in HTTP.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// No response was received (connect refused, DNS, timeout, TLS).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    // =========================================================================
    // Application Errors
    // =========================================================================
    /// The backend answered with `success: false`.
    #[error("{message}")]
    Api { message: String },

    /// The request body failed validation and was not sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The response could not be decoded into the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidUrl(err.to_string())
        } else {
            ClientError::Network(err)
        }
    }
}

impl From<Rejected> for ClientError {
    fn from(err: Rejected) -> Self {
        ClientError::Api {
            message: err.message,
        }
    }
}

impl From<FieldErrors> for ClientError {
    fn from(err: FieldErrors) -> Self {
        ClientError::Validation(err)
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(fields) => ClientError::Validation(fields),
            CoreError::InvalidPayload(msg) => ClientError::Decode(msg),
            CoreError::Route(route) => ClientError::InvalidUrl(route.to_string()),
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if the backend was never reached.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Returns true if repeating the same call may succeed.
    ///
    /// ## Retryable Errors
    /// - Network failures (offline, timeout)
    ///
    /// ## Non-Retryable Errors
    /// - Validation errors (fix the form first)
    /// - Configuration errors
    /// - Application failures and decode errors
    ///
    /// The client never retries on its own; this only picks the UI
    /// affordance.
    pub fn is_retryable(&self) -> bool {
        self.is_network()
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::InvalidHeader { .. }
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// Field messages when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}
