//! Order DTOs relayed from the order service.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Order;

/// `data` of the orders envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersData {
    pub orders: Vec<Order>,
}
