//! # bistro-client: API Access Layer for Bistro
//!
//! Issues every request the management front-end makes to the backend and
//! turns each answer into an [`ApiResponse`].
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ClientConfig::load ──► ApiClient::new ──► client.staff().list(..)     │
//! │   (toml + env)            (reqwest)              │                      │
//! │                                                  ▼                      │
//! │                          build_url + build_headers ──► HTTP ──► backend │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                          normalize_api_response (bistro-core)           │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                          LatestOnly::apply(ticket, response)            │
//! │                          (stale answers are dropped)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - `ApiClient` and the request lifecycle
//! - [`headers`] - Header, URL and query construction
//! - [`services`] - One service per backend resource
//! - [`generation`] - Request tickets guarding against stale responses
//! - [`config`] - TOML + environment configuration
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - Client error types

pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod headers;
pub mod logging;
pub mod services;

pub use bistro_core::envelope::ApiResponse;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use generation::{LatestOnly, RequestGeneration, RequestTicket};
pub use headers::{build_headers, build_url, HeaderConfig, RequestOptions};
