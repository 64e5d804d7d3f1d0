//! # Payment Method Service
//!
//! Payment methods configured under settings, plus the summary card shown
//! above the list.

use bistro_core::envelope::ApiResponse;
use bistro_core::format::{calculate_payment_stats, PaymentStats};
use bistro_core::types::PaymentMethod;

use crate::client::ApiClient;
use crate::error::ClientResult;

const PAYMENT_METHODS_PATH: &str = "/settings/payment-methods";

#[derive(Debug, Clone)]
pub struct PaymentMethodService {
    client: ApiClient,
}

impl PaymentMethodService {
    pub fn new(client: ApiClient) -> Self {
        PaymentMethodService { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<PaymentMethod>>> {
        self.client.get(PAYMENT_METHODS_PATH).await
    }

    /// Fetches the list and summarizes it. A failed list stays a failure.
    pub async fn stats(&self) -> ClientResult<ApiResponse<PaymentStats>> {
        let methods = self.list().await?;
        Ok(methods.map(|list| calculate_payment_stats(&list)))
    }
}
