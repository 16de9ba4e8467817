//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the order client and handlers.

mod duplicate_check;
mod order_service;
mod user_service;

pub use duplicate_check::ensure_unique;
pub use order_service::OrderService;
pub use user_service::UserService;

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::external::OrderClient;
use crate::repositories::UserRepository;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub orders: OrderService,
}

impl Services {
    /// Creates a new Services instance over one pool and one order client.
    pub fn new(pool: AsyncDbPool, order_client: Arc<dyn OrderClient>) -> Self {
        let users = UserRepository::new(pool);
        Self {
            users: UserService::new(users.clone()),
            orders: OrderService::new(users, order_client),
        }
    }
}
