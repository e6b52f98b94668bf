//! HTTP client for the order server's print queue

use serde::de::DeserializeOwned;
use shared::models::OrderDetail;
use shared::ApiResponse;

use crate::error::{BridgeError, BridgeResult};

/// 訂單伺服器 API 客戶端
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch orders waiting to be printed, oldest first
    pub async fn fetch_pending_print(&self) -> BridgeResult<Vec<OrderDetail>> {
        let url = format!("{}/api/orders/pending-print", self.base_url);
        let response = self.http.get(&url).send().await?;
        Self::unwrap_envelope(response.json::<ApiResponse<Vec<OrderDetail>>>().await?)
    }

    /// Acknowledge a printed order. Safe to call more than once.
    pub async fn mark_as_printed(&self, order_id: &str) -> BridgeResult<()> {
        let url = format!("{}/api/orders/{order_id}/mark-as-printed", self.base_url);
        let response = self.http.post(&url).send().await?;
        Self::unwrap_envelope(response.json::<ApiResponse<serde_json::Value>>().await?)?;
        Ok(())
    }

    fn unwrap_envelope<T: DeserializeOwned>(envelope: ApiResponse<T>) -> BridgeResult<T> {
        match envelope.code {
            None | Some(0) => envelope.data.ok_or(BridgeError::Api {
                code: 0,
                message: "Response missing data".to_string(),
            }),
            Some(code) => Err(BridgeError::Api {
                code,
                message: envelope.message,
            }),
        }
    }
}
