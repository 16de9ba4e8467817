//! Application state for the Axum router.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::external::OrderClient;
use crate::services::Services;

/// Shared services and resources handed to every handler.
///
/// Cloning is cheap: the pool and the order client are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Direct pool access for health checks
    pub db_pool: AsyncDbPool,
}

impl AppState {
    pub fn new(pool: AsyncDbPool, order_client: Arc<dyn OrderClient>) -> Self {
        Self {
            services: Services::new(pool.clone(), order_client),
            db_pool: pool,
        }
    }
}
