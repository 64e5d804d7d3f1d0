//! # Request Bodies and Filters
//!
//! What the client sends: validated create/update bodies and the list
//! filters that become query strings.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Form state ──► CreateStaffRequest ──► validate_request()               │
//! │                                          │                              │
//! │                         ┌────────────────┴────────────────┐             │
//! │                         ▼                                 ▼             │
//! │                       Ok(())                     Err(FieldErrors)       │
//! │                  body is sent              { "cnic": ["..."] }          │
//! │                                            no request leaves the app    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are declared with `validator` derive attributes. Messages are
//! written for display next to the form input.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::FieldErrors;
use crate::format::{StockStatus, CNIC_DIGITS};

/// Runs the derived rules and converts failures into [`FieldErrors`].
///
/// ```rust
/// use bistro_core::requests::{validate_request, CategoryRequest};
///
/// let req = CategoryRequest { name: String::new(), description: None, is_active: true };
/// let errors = validate_request(&req).unwrap_err();
/// assert_eq!(errors.messages("name"), ["name is required".to_string()]);
/// ```
pub fn validate_request<T: Validate>(request: &T) -> Result<(), FieldErrors> {
    request.validate().map_err(FieldErrors::from)
}

/// A CNIC must carry exactly 13 digits once dashes are removed.
fn validate_cnic(value: &str) -> Result<(), validator::ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let only_digits_and_dashes = value.chars().all(|c| c.is_ascii_digit() || c == '-');

    if digits == CNIC_DIGITS && only_digits_and_dashes {
        Ok(())
    } else {
        Err(validator::ValidationError::new("cnic")
            .with_message(Cow::Borrowed("cnic must have 13 digits")))
    }
}

// =============================================================================
// Staff
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_cnic"))]
    pub cnic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u32>,

    #[validate(range(min = 0.0, message = "salary cannot be negative"))]
    pub salary: f64,
}

/// Partial update; absent fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_cnic"))]
    pub cnic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "role is required"))]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "salary cannot be negative"))]
    pub salary: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,

    #[validate(range(min = 0.0, message = "stock cannot be negative"))]
    pub stock: f64,

    #[validate(range(min = 0.0, message = "threshold cannot be negative"))]
    pub threshold: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "cost per unit cannot be negative"))]
    pub cost_per_unit: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// Sets the stock level of one item, centrally or at a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequest {
    #[validate(range(min = 0.0, message = "stock cannot be negative"))]
    pub stock: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "threshold cannot be negative"))]
    pub threshold: Option<f64>,

    /// Free-text reason recorded with the adjustment.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "reason must be at most 200 characters"))]
    pub reason: Option<String>,
}

// =============================================================================
// Menu
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "category is required"))]
    pub category_id: u32,

    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,

    pub is_available: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_on_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOnRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,

    pub is_active: bool,
}

// =============================================================================
// List Filters
// =============================================================================
// Unset fields are skipped, so an all-default filter produces no query.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PayrollFilter {
    /// Pay period, `YYYY-MM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BranchInventoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn staff() -> CreateStaffRequest {
        CreateStaffRequest {
            name: "Ayesha Khan".to_string(),
            cnic: Some("35202-1234567-1".to_string()),
            phone: Some("0300-1234567".to_string()),
            role: "Cashier".to_string(),
            branch_id: Some(2),
            salary: 45000.0,
        }
    }

    #[test]
    fn test_valid_staff_request() {
        assert_eq!(validate_request(&staff()), Ok(()));
    }

    #[test]
    fn test_staff_request_field_errors() {
        let req = CreateStaffRequest {
            name: String::new(),
            cnic: Some("35202-123".to_string()),
            salary: -1.0,
            ..staff()
        };
        let errors = validate_request(&req).unwrap_err();

        assert_eq!(errors.messages("name"), ["name is required".to_string()]);
        assert_eq!(errors.messages("cnic"), ["cnic must have 13 digits".to_string()]);
        assert_eq!(errors.messages("salary"), ["salary cannot be negative".to_string()]);
        assert!(errors.messages("role").is_empty());
    }

    #[test]
    fn test_cnic_rules() {
        assert!(validate_cnic("3520212345671").is_ok());
        assert!(validate_cnic("35202-1234567-1").is_ok());
        assert!(validate_cnic("35202 1234567 1").is_err());
        assert!(validate_cnic("35202-1234567-12").is_err());
    }

    #[test]
    fn test_update_staff_skips_absent_fields() {
        let req = UpdateStaffRequest {
            salary: Some(50000.0),
            ..Default::default()
        };
        assert_eq!(validate_request(&req), Ok(()));
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "salary": 50000.0 }));
    }

    #[test]
    fn test_update_stock_rejects_negative() {
        let req = UpdateStockRequest {
            stock: -3.0,
            threshold: None,
            reason: None,
        };
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["stock"]);
    }

    #[test]
    fn test_menu_item_requires_category() {
        let req = CreateMenuItemRequest {
            name: "Zinger Burger".to_string(),
            description: None,
            category_id: 0,
            price: 550.0,
            is_available: true,
            add_on_ids: vec![],
        };
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(errors.fields().count(), 1);
        assert!(errors.to_string().ends_with("category is required"));
    }

    #[test]
    fn test_filter_serializes_only_set_fields() {
        assert_eq!(serde_json::to_value(StaffFilter::default()).unwrap(), json!({}));

        let filter = InventoryFilter {
            status: Some(StockStatus::Low),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(filter).unwrap(), json!({ "status": "Low" }));
    }
}
