//! # Customer Service
//!
//! The customer profile page: the customer record and their order history.

use bistro_core::envelope::ApiResponse;
use bistro_core::route::CustomerId;
use bistro_core::types::{CustomerItem, OrderItem};

use crate::client::ApiClient;
use crate::error::ClientResult;

#[derive(Debug, Clone)]
pub struct CustomerService {
    client: ApiClient,
}

impl CustomerService {
    pub fn new(client: ApiClient) -> Self {
        CustomerService { client }
    }

    pub async fn get(&self, id: CustomerId) -> ClientResult<ApiResponse<CustomerItem>> {
        self.client.get(&customer_path(id)).await
    }

    /// Orders placed by the customer, newest first as sent by the backend.
    pub async fn orders(&self, id: CustomerId) -> ClientResult<ApiResponse<Vec<OrderItem>>> {
        self.client.get(&format!("{}/orders", customer_path(id))).await
    }
}

fn customer_path(id: CustomerId) -> String {
    format!("/customers/{}", id)
}
