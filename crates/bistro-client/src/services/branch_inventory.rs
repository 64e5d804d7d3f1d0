//! # Branch Inventory Service
//!
//! Stock levels held at one branch.
//!
//! The branch comes from the page URL via
//! [`bistro_core::route::use_branch_id`], so a call can only be made once
//! the route has a valid id.
//!
//! ## Endpoints
//! ```text
//! GET /branch/{branchId}/inventory            list(branch, filter)
//! PUT /branch/{branchId}/inventory/{itemId}   update_stock(branch, item, req)
//! ```

use bistro_core::envelope::ApiResponse;
use bistro_core::requests::{BranchInventoryFilter, UpdateStockRequest};
use bistro_core::route::BranchId;
use bistro_core::types::BranchInventoryItem;
use tracing::debug;

use super::ensure_valid;
use crate::client::ApiClient;
use crate::error::ClientResult;

#[derive(Debug, Clone)]
pub struct BranchInventoryService {
    client: ApiClient,
}

impl BranchInventoryService {
    pub fn new(client: ApiClient) -> Self {
        BranchInventoryService { client }
    }

    pub async fn list(
        &self,
        branch: BranchId,
        filter: &BranchInventoryFilter,
    ) -> ClientResult<ApiResponse<Vec<BranchInventoryItem>>> {
        debug!(%branch, "Listing branch inventory");
        self.client.get_with_query(&inventory_path(branch), filter).await
    }

    /// Sets the stock of one item at the branch. Negative stock is
    /// rejected before the request is sent.
    pub async fn update_stock(
        &self,
        branch: BranchId,
        item_id: u32,
        request: &UpdateStockRequest,
    ) -> ClientResult<ApiResponse<BranchInventoryItem>> {
        ensure_valid(request)?;
        debug!(%branch, item_id, stock = request.stock, "Updating branch stock");
        self.client
            .put(&format!("{}/{}", inventory_path(branch), item_id), request)
            .await
    }
}

fn inventory_path(branch: BranchId) -> String {
    format!("/branch/{}/inventory", branch)
}
