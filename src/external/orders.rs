//! Order service client.
//!
//! The order service answers `GET {base_url}/api/orders?userId={id}` with
//! `{"status": ..., "message": ..., "data": {"orders": [...]}}`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::settings::OrderServiceConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::build_http_client;
use crate::models::Order;

/// Name used for the order service in errors and logs.
pub const ORDER_SERVICE: &str = "order service";

/// Source of a user's orders.
#[async_trait]
pub trait OrderClient: Send + Sync {
    async fn fetch_orders(&self, user_id: i32) -> AppResult<Vec<Order>>;
}

#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    #[serde(default)]
    data: OrdersPayload,
}

#[derive(Debug, Default, Deserialize)]
struct OrdersPayload {
    #[serde(default)]
    orders: Vec<Order>,
}

/// `OrderClient` over HTTP. No retries; a failed call fails the request.
pub struct HttpOrderClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOrderClient {
    pub fn new(config: &OrderServiceConfig) -> AppResult<Self> {
        Ok(Self::with_client(&config.base_url, build_http_client(config)?))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn orders_url(&self, user_id: i32) -> String {
        format!("{}/api/orders?userId={}", self.base_url, user_id)
    }

    fn unavailable(e: reqwest::Error) -> AppError {
        AppError::UpstreamUnavailable {
            service: ORDER_SERVICE.to_string(),
            source: e.into(),
        }
    }
}

#[async_trait]
impl OrderClient for HttpOrderClient {
    async fn fetch_orders(&self, user_id: i32) -> AppResult<Vec<Order>> {
        let resp = self
            .client
            .get(self.orders_url(user_id))
            .send()
            .await
            .map_err(Self::unavailable)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(user_id, status = status.as_u16(), "Order service returned an error status");
            return Err(AppError::UpstreamError {
                service: ORDER_SERVICE.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(Self::unavailable)?;
        let envelope: OrdersEnvelope =
            serde_json::from_slice(&body).map_err(|e| AppError::UpstreamMalformed {
                service: ORDER_SERVICE.to_string(),
                source: e.into(),
            })?;

        Ok(envelope.data.orders)
    }
}
