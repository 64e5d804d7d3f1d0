//! # Add-on Service
//!
//! Extras that can be attached to menu items (cheese, sauces, sides).

use bistro_core::envelope::ApiResponse;
use bistro_core::requests::AddOnRequest;
use bistro_core::types::AddOn;
use serde_json::Value;

use super::{discard_data, ensure_valid};
use crate::client::ApiClient;
use crate::error::ClientResult;

const ADD_ONS_PATH: &str = "/menu/add-ons";

#[derive(Debug, Clone)]
pub struct AddOnService {
    client: ApiClient,
}

impl AddOnService {
    pub fn new(client: ApiClient) -> Self {
        AddOnService { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<AddOn>>> {
        self.client.get(ADD_ONS_PATH).await
    }

    pub async fn create(&self, request: &AddOnRequest) -> ClientResult<ApiResponse<AddOn>> {
        ensure_valid(request)?;
        self.client.post(ADD_ONS_PATH, request).await
    }

    pub async fn update(&self, id: u32, request: &AddOnRequest) -> ClientResult<ApiResponse<AddOn>> {
        ensure_valid(request)?;
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
    format!("{}/{}", ADD_ONS_PATH, id)
}
