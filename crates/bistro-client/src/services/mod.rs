//! # Domain Services
//!
//! One thin service per backend resource.
//!
//! ## Service Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Page                                                                   │
//! │    │  client.staff().list(&filter)                                     │
//! │    ▼                                                                    │
//! │  StaffService                                                           │
//! │  ├── validate body (create/update only) ──► ClientError::Validation    │
//! │  ├── pick method + path                                                 │
//! │  └── ApiClient::request                                                 │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ApiResponse<T>                                                         │
//! │                                                                         │
//! │  Services never join, cache, or retry. Reads are GET, creates POST,   │
//! │  updates PUT, deletes DELETE.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Services
//!
//! - [`StaffService`] - Staff CRUD and payroll
//! - [`InventoryService`] - Central inventory items
//! - [`MenuService`] - Menu items and their options
//! - [`CategoryService`] - Menu categories
//! - [`AddOnService`] - Menu add-ons
//! - [`BranchInventoryService`] - Stock held at a branch
//! - [`CustomerService`] - Customer profiles and order history
//! - [`PaymentMethodService`] - Payment methods and their summary

pub mod add_ons;
pub mod branch_inventory;
pub mod categories;
pub mod customers;
pub mod inventory;
pub mod menu;
pub mod payment_methods;
pub mod staff;

pub use add_ons::AddOnService;
pub use branch_inventory::BranchInventoryService;
pub use categories::CategoryService;
pub use customers::CustomerService;
pub use inventory::InventoryService;
pub use menu::MenuService;
pub use payment_methods::PaymentMethodService;
pub use staff::StaffService;

use bistro_core::envelope::ApiResponse;
use bistro_core::requests::validate_request;
use serde_json::Value;
use tracing::debug;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};

/// Checks a body before it is sent.
pub(crate) fn ensure_valid<B: Validate>(body: &B) -> ClientResult<()> {
    validate_request(body).map_err(|errors| {
        debug!(fields = %errors, "Request body rejected before sending");
        ClientError::Validation(errors)
    })
}

/// Drops whatever a delete endpoint echoes back.
pub(crate) fn discard_data(response: ApiResponse<Value>) -> ApiResponse<()> {
    response.map(|_| ())
}

impl ApiClient {
    pub fn staff(&self) -> StaffService {
        StaffService::new(self.clone())
    }

    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.clone())
    }

    pub fn menu(&self) -> MenuService {
        MenuService::new(self.clone())
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.clone())
    }

    pub fn add_ons(&self) -> AddOnService {
        AddOnService::new(self.clone())
    }

    pub fn branch_inventory(&self) -> BranchInventoryService {
        BranchInventoryService::new(self.clone())
    }

    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.clone())
    }

    pub fn payment_methods(&self) -> PaymentMethodService {
        PaymentMethodService::new(self.clone())
    }
}
