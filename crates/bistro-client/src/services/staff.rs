//! # Staff Service
//!
//! Staff records and payroll runs.
//!
//! ## Endpoints
//! ```text
//! GET    /staff            list(filter)
//! GET    /staff/{id}       get(id)
//! POST   /staff            create(req)
//! PUT    /staff/{id}       update(id, req)
//! DELETE /staff/{id}       delete(id)
//! GET    /staff/payroll    payroll(filter)
//! ```

use bistro_core::envelope::ApiResponse;
use bistro_core::requests::{CreateStaffRequest, PayrollFilter, StaffFilter, UpdateStaffRequest};
use bistro_core::types::{PayrollEntry, StaffItem};
use serde_json::Value;
use tracing::debug;

use super::{discard_data, ensure_valid};
use crate::client::ApiClient;
use crate::error::ClientResult;

const STAFF_PATH: &str = "/staff";
const PAYROLL_PATH: &str = "/staff/payroll";

/// Service for staff operations.
///
/// ## Usage
/// ```rust,ignore
/// let staff = client.staff();
///
/// let cashiers = staff.list(&StaffFilter { role: Some("Cashier".into()), ..Default::default() }).await?;
/// let created = staff.create(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StaffService {
    client: ApiClient,
}

impl StaffService {
    pub fn new(client: ApiClient) -> Self {
        StaffService { client }
    }

    pub async fn list(&self, filter: &StaffFilter) -> ClientResult<ApiResponse<Vec<StaffItem>>> {
        debug!(?filter, "Listing staff");
        self.client.get_with_query(STAFF_PATH, filter).await
    }

    pub async fn get(&self, id: u32) -> ClientResult<ApiResponse<StaffItem>> {
        self.client.get(&item_path(id)).await
    }

    /// Creates a staff member. The body is validated first; an invalid
    /// body never reaches the backend.
    pub async fn create(&self, request: &CreateStaffRequest) -> ClientResult<ApiResponse<StaffItem>> {
        ensure_valid(request)?;
        debug!(name = %request.name, role = %request.role, "Creating staff member");
        self.client.post(STAFF_PATH, request).await
    }

    pub async fn update(
        &self,
        id: u32,
        request: &UpdateStaffRequest,
    ) -> ClientResult<ApiResponse<StaffItem>> {
        ensure_valid(request)?;
        debug!(id, "Updating staff member");
        self.client.put(&item_path(id), request).await
    }

    pub async fn delete(&self, id: u32) -> ClientResult<ApiResponse<()>> {
        debug!(id, "Deleting staff member");
        self.client
            .delete::<Value>(&item_path(id))
            .await
            .map(discard_data)
    }

    /// Payroll entries for a period and/or branch.
    pub async fn payroll(&self, filter: &PayrollFilter) -> ClientResult<ApiResponse<Vec<PayrollEntry>>> {
        self.client.get_with_query(PAYROLL_PATH, filter).await
    }
}

fn item_path(id: u32) -> String {
    format!("{}/{}", STAFF_PATH, id)
}
