//! # bistro-core: Pure Logic for the Bistro Client
//!
//! Everything the management front-end decides without touching the
//! network: how a page is titled, which submenu it shows, what a backend
//! response means, and how values are displayed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bistro Client Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Pages / Layouts (UI)                         │   │
//! │  │    POS ──► Staff ──► Inventory ──► Menu ──► Settings           │   │
//! │  └───────────────┬──────────────────────────────┬──────────────────┘   │
//! │                  │ NavigationState::resolve     │ services             │
//! │  ┌───────────────▼───────────────┐  ┌───────────▼──────────────────┐   │
//! │  │  ★ bistro-core (THIS CRATE) ★ │  │      bistro-client           │   │
//! │  │                               │◄─┤  ApiClient, services,        │   │
//! │  │  navigation   layout  route   │  │  config, generations         │   │
//! │  │  envelope     format  money   │  └───────────┬──────────────────┘   │
//! │  │  types        requests        │              │ HTTP                 │
//! │  │                               │  ┌───────────▼──────────────────┐   │
//! │  │  NO I/O • NO NETWORK          │  │        REST backend          │   │
//! │  └───────────────────────────────┘  └──────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`navigation`] - The static navigation tree and path lookups
//! - [`layout`] - Section submenus composed from path and params
//! - [`route`] - Route parameters and typed branch/customer ids
//! - [`envelope`] - `ApiResponse` and response normalization
//! - [`format`] - Stock status, CNIC, staff ids, payment stats
//! - [`money`] - Integer currency amounts and display formatting
//! - [`types`] - Domain records
//! - [`requests`] - Validated request bodies and list filters
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::route::NavigationState;
//!
//! let state = NavigationState::resolve("/branch/5/staff/payroll");
//! assert_eq!(state.title, "Payroll");
//! assert_eq!(state.branch_id().unwrap().get(), 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod envelope;
pub mod error;
pub mod format;
pub mod layout;
pub mod money;
pub mod navigation;
pub mod requests;
pub mod route;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use envelope::{normalize_api_response, ApiResponse, RawEnvelope};
pub use error::{CoreError, CoreResult, FieldErrors, RouteError};
pub use layout::{compose_layout, LayoutModel, Section, SubmenuEntry};
pub use money::{CurrencyFormat, Money};
pub use navigation::{find_navigation_item, get_page_title, NavigationItem, NAVIGATION};
pub use route::{use_branch_id, use_customer_id, BranchId, CustomerId, NavigationState, RouteParams};
pub use types::*;
