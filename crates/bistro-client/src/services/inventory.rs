//! # Inventory Service
//!
//! Items in the central inventory. Branch stock lives in
//! [`super::BranchInventoryService`].

use bistro_core::envelope::ApiResponse;
use bistro_core::requests::{CreateInventoryItemRequest, InventoryFilter};
use bistro_core::types::InventoryItem;
use serde_json::Value;
use tracing::debug;

use super::{discard_data, ensure_valid};
use crate::client::ApiClient;
use crate::error::ClientResult;

const INVENTORY_PATH: &str = "/inventory";

#[derive(Debug, Clone)]
pub struct InventoryService {
    client: ApiClient,
}

impl InventoryService {
    pub fn new(client: ApiClient) -> Self {
        InventoryService { client }
    }

    pub async fn list(&self, filter: &InventoryFilter) -> ClientResult<ApiResponse<Vec<InventoryItem>>> {
        self.client.get_with_query(INVENTORY_PATH, filter).await
    }

    pub async fn get(&self, id: u32) -> ClientResult<ApiResponse<InventoryItem>> {
        self.client.get(&item_path(id)).await
    }

    pub async fn create(
        &self,
        request: &CreateInventoryItemRequest,
    ) -> ClientResult<ApiResponse<InventoryItem>> {
        ensure_valid(request)?;
        debug!(name = %request.name, "Creating inventory item");
        self.client.post(INVENTORY_PATH, request).await
    }

    /// Replaces every field of the item.
    pub async fn update(
        &self,
        id: u32,
        request: &CreateInventoryItemRequest,
    ) -> ClientResult<ApiResponse<InventoryItem>> {
        ensure_valid(request)?;
        debug!(id, "Updating inventory item");
        self.client.put(&item_path(id), request).await
    }

    pub async fn delete(&self, id: u32) -> ClientResult<ApiResponse<()>> {
        self.client
            .delete::<Value>(&item_path(id))
            .await
            .map(discard_data)
    }
}

fn item_path(id: u32) -> String {
    format!("{}/{}", INVENTORY_PATH, id)
}
