//! # Category Service

use bistro_core::envelope::ApiResponse;
use bistro_core::requests::CategoryRequest;
use bistro_core::types::Category;
use serde_json::Value;

use super::{discard_data, ensure_valid};
use crate::client::ApiClient;
use crate::error::ClientResult;

const CATEGORIES_PATH: &str = "/menu/categories";

#[derive(Debug, Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        CategoryService { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<Category>>> {
        self.client.get(CATEGORIES_PATH).await
    }

    pub async fn create(&self, request: &CategoryRequest) -> ClientResult<ApiResponse<Category>> {
        ensure_valid(request)?;
        self.client.post(CATEGORIES_PATH, request).await
    }

    pub async fn update(&self, id: u32, request: &CategoryRequest) -> ClientResult<ApiResponse<Category>> {
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
    format!("{}/{}", CATEGORIES_PATH, id)
}
