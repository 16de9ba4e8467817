//! Orders of a local user, fetched from the order service.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::OrderClient;
use crate::models::Order;
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct OrderService {
    users: UserRepository,
    client: Arc<dyn OrderClient>,
}

impl OrderService {
    pub fn new(users: UserRepository, client: Arc<dyn OrderClient>) -> Self {
        Self { users, client }
    }

    /// Fetches the orders of a live user.
    ///
    /// The pooled connection is returned before the outbound call, so a slow
    /// order service never holds a database connection.
    pub async fn orders_for_user(&self, user_id: i32) -> AppResult<Vec<Order>> {
        {
            let mut conn = self.users.connection().await?;
            if UserRepository::find_by_id(&mut conn, user_id).await?.is_none() {
                return Err(AppError::not_found("user", "id", user_id));
            }
        }

        let orders = self.client.fetch_orders(user_id).await?;
        tracing::debug!(user_id, count = orders.len(), "Fetched orders");
        Ok(orders)
    }
}
