//! # Domain Types
//!
//! Flat records mirroring backend entities.
//!
//! ## Record Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StaffItem     │   │  CustomerItem   │   │   OrderItem     │       │
//! │  │  id, name, cnic │   │  id, name,phone │   │  order_number   │       │
//! │  │  role, salary   │   │  total_spent    │   │  lines, total   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   MenuItem      │   │  InventoryItem  │   │ PaymentMethod   │       │
//! │  │  Category,AddOn │   │  BranchInventory│   │  Status,TaxType │       │
//! │  │  MenuItemOptions│   │  stock/threshold│   │  (PascalCase)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Records are created from API responses, held in page-local state, and
//! dropped on navigation away. Nothing here is persisted or cached.
//!
//! Backend payloads are camelCase except payment methods, which the
//! settings API sends in PascalCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::{calculate_status, format_staff_id, StockStatus};
use crate::money::Money;

// =============================================================================
// Staff
// =============================================================================

/// A staff member as listed on the staff and payroll pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffItem {
    pub id: u32,
    pub name: String,
    /// National identity number, digits only or already dashed.
    #[serde(default)]
    pub cnic: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default)]
    pub branch_id: Option<u32>,
    /// Monthly salary as a decimal amount.
    #[serde(default)]
    pub salary: f64,
    #[serde(default = "default_active")]
    pub status: String,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub joined_at: Option<DateTime<Utc>>,
}

impl StaffItem {
    /// The `#007` style identifier shown in tables.
    pub fn display_id(&self) -> String {
        format_staff_id(self.id)
    }

    pub fn salary(&self) -> Money {
        Money::from_decimal(self.salary)
    }

    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

fn default_active() -> String {
    "Active".to_string()
}

/// One row of a payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEntry {
    pub staff_id: u32,
    pub staff_name: String,
    /// Pay period label, e.g. "2024-06".
    pub period: String,
    pub base_salary: f64,
    #[serde(default)]
    pub bonuses: f64,
    #[serde(default)]
    pub deductions: f64,
}

impl PayrollEntry {
    /// Base salary plus bonuses minus deductions.
    pub fn net_pay(&self) -> Money {
        Money::from_decimal(self.base_salary) + Money::from_decimal(self.bonuses)
            - Money::from_decimal(self.deductions)
    }
}

// =============================================================================
// Customers & Orders
// =============================================================================

/// A customer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub last_order_at: Option<DateTime<Utc>>,
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: u32,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        Money::from_decimal(self.unit_price).multiply_quantity(i64::from(self.quantity))
    }
}

/// An order as shown on the POS list and customer history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: u32,
    pub order_number: String,
    #[serde(default)]
    pub customer_id: Option<u32>,
    #[serde(default)]
    pub branch_id: Option<u32>,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    pub total: f64,
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Sum of the line totals. May differ from `total` when the backend
    /// applied discounts or service charges.
    pub fn lines_total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

// =============================================================================
// Menu
// =============================================================================

/// A menu category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// An add-on that can be attached to menu items (extra cheese, sauces).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: u32,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A sellable menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: u32,
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MenuItem {
    pub fn price(&self) -> Money {
        Money::from_decimal(self.price)
    }
}

/// A size or variant of a menu item with its own price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuVariation {
    pub name: String,
    pub price: f64,
}

/// Variations and add-ons selectable for a menu item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemOptions {
    pub menu_item_id: u32,
    #[serde(default)]
    pub variations: Vec<MenuVariation>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Inventory
// =============================================================================

/// A stock item in the central inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: u32,
    pub name: String,
    /// Unit of measure ("kg", "litre", "pcs").
    pub unit: String,
    pub stock: f64,
    /// Reorder threshold; at or below this the item is Low.
    pub threshold: f64,
    #[serde(default)]
    pub cost_per_unit: f64,
    #[serde(default)]
    pub supplier: Option<String>,
}

impl InventoryItem {
    pub fn status(&self) -> StockStatus {
        calculate_status(self.stock, self.threshold)
    }
}

/// Stock of an inventory item held at one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BranchInventoryItem {
    pub branch_id: u32,
    pub item_id: u32,
    pub name: String,
    pub unit: String,
    pub stock: f64,
    pub threshold: f64,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BranchInventoryItem {
    pub fn status(&self) -> StockStatus {
        calculate_status(self.stock, self.threshold)
    }
}

// =============================================================================
// Payment Methods
// =============================================================================

/// A payment method configured under settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentMethod {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    /// "Active" or "Inactive".
    pub status: String,
    /// Tax regime applied to payments through this method ("VAT", "GST").
    pub tax_type: String,
    #[serde(default)]
    pub tax_rate: Option<f64>,
}

impl PaymentMethod {
    /// Status comparison is exact: only `"Active"` counts.
    pub fn is_active(&self) -> bool {
        self.status == "Active"
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
    fn test_staff_item_from_backend_json() {
        let staff: StaffItem = serde_json::from_value(json!({
            "id": 7,
            "name": "Ayesha Khan",
            "cnic": "35202-1234567-1",
            "role": "Cashier",
            "branchId": 2,
            "salary": 45000.0
        }))
        .unwrap();

        assert_eq!(staff.display_id(), "#007");
        assert_eq!(staff.branch_id, Some(2));
        assert!(staff.is_active());
        assert_eq!(staff.salary().minor(), 4_500_000);
    }

    #[test]
    fn test_payroll_net_pay() {
        let entry = PayrollEntry {
            staff_id: 1,
            staff_name: "Bilal".to_string(),
            period: "2024-06".to_string(),
            base_salary: 50000.0,
            bonuses: 2500.5,
            deductions: 1000.0,
        };
        assert_eq!(entry.net_pay().minor(), 5_150_050);
    }

    #[test]
    fn test_order_lines_total() {
        let order: OrderItem = serde_json::from_value(json!({
            "id": 1,
            "orderNumber": "ORD-0001",
            "lines": [
                { "menuItemId": 1, "name": "Zinger", "quantity": 2, "unitPrice": 550.0 },
                { "menuItemId": 2, "name": "Fries", "quantity": 1, "unitPrice": 250.0 }
            ],
            "total": 1350.0,
            "status": "completed",
            "createdAt": "2024-06-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(order.lines_total().minor(), 135_000);
        assert_eq!(order.customer_id, None);
    }

    #[test]
    fn test_oversized_prices_do_not_overflow() {
        let line: OrderLine = serde_json::from_value(json!({
            "menuItemId": 1,
            "name": "Catering",
            "quantity": 2,
            "unitPrice": 1e17
        }))
        .unwrap();
        assert_eq!(line.line_total().minor(), i64::MAX);

        let entry = PayrollEntry {
            staff_id: 1,
            staff_name: "Owner".to_string(),
            period: "2024-06".to_string(),
            base_salary: 1e17,
            bonuses: 1e17,
            deductions: 0.0,
        };
        assert_eq!(entry.net_pay().minor(), i64::MAX);
    }

    #[test]
    fn test_inventory_status() {
        let item = InventoryItem {
            id: 1,
            name: "Flour".to_string(),
            unit: "kg".to_string(),
            stock: 10.0,
            threshold: 10.0,
            cost_per_unit: 120.0,
            supplier: None,
        };
        assert_eq!(item.status(), StockStatus::Low);
    }

    #[test]
    fn test_payment_method_pascal_case() {
        let method: PaymentMethod = serde_json::from_value(json!({
            "Name": "Card",
            "Status": "Active",
            "TaxType": "VAT"
        }))
        .unwrap();
        assert!(method.is_active());
        assert_eq!(method.tax_type, "VAT");

        let inactive: PaymentMethod = serde_json::from_value(json!({
            "Status": "active",
            "TaxType": "GST"
        }))
        .unwrap();
        assert!(!inactive.is_active());
    }

    #[test]
    fn test_menu_item_defaults() {
        let item: MenuItem = serde_json::from_value(json!({
            "id": 3,
            "name": "Chai",
            "categoryId": 1,
            "price": 120
        }))
        .unwrap();
        assert!(item.is_available);
        assert_eq!(item.price().minor(), 12_000);
    }
}
