//! # Menu Service
//!
//! Sellable menu items and the options (variations, add-ons) offered with
//! each one.
//!
//! ## Endpoints
//! ```text
//! GET    /menu                list_items(filter)
//! GET    /menu/{id}           get_item(id)
//! POST   /menu                create_item(req)
//! PUT    /menu/{id}           update_item(id, req)
//! DELETE /menu/{id}           delete_item(id)
//! GET    /menu/{id}/options   item_options(id)
//! ```

use bistro_core::envelope::ApiResponse;
use bistro_core::requests::{CreateMenuItemRequest, MenuFilter};
use bistro_core::types::{MenuItem, MenuItemOptions};
use serde_json::Value;
use tracing::debug;

use super::{discard_data, ensure_valid};
use crate::client::ApiClient;
use crate::error::ClientResult;

const MENU_PATH: &str = "/menu";

#[derive(Debug, Clone)]
pub struct MenuService {
    client: ApiClient,
}

impl MenuService {
    pub fn new(client: ApiClient) -> Self {
        MenuService { client }
    }

    pub async fn list_items(&self, filter: &MenuFilter) -> ClientResult<ApiResponse<Vec<MenuItem>>> {
        self.client.get_with_query(MENU_PATH, filter).await
    }

    pub async fn get_item(&self, id: u32) -> ClientResult<ApiResponse<MenuItem>> {
        self.client.get(&item_path(id)).await
    }

    pub async fn create_item(
        &self,
        request: &CreateMenuItemRequest,
    ) -> ClientResult<ApiResponse<MenuItem>> {
        ensure_valid(request)?;
        debug!(name = %request.name, category_id = request.category_id, "Creating menu item");
        self.client.post(MENU_PATH, request).await
    }

    pub async fn update_item(
        &self,
        id: u32,
        request: &CreateMenuItemRequest,
    ) -> ClientResult<ApiResponse<MenuItem>> {
        ensure_valid(request)?;
        self.client.put(&item_path(id), request).await
    }

    pub async fn delete_item(&self, id: u32) -> ClientResult<ApiResponse<()>> {
        debug!(id, "Deleting menu item");
        self.client
            .delete::<Value>(&item_path(id))
            .await
            .map(discard_data)
    }

    /// Variations and add-ons shown when the item is added to an order.
    pub async fn item_options(&self, id: u32) -> ClientResult<ApiResponse<MenuItemOptions>> {
        self.client.get(&format!("{}/options", item_path(id))).await
    }
}

fn item_path(id: u32) -> String {
    format!("{}/{}", MENU_PATH, id)
}
