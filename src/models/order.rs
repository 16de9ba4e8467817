//! Order records owned by the external order service.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An order as reported by the order service.
///
/// The order service emits camelCase keys and an upper-case `ID`; both the
/// upper- and lower-case spelling of the identifier are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "ID")]
    pub id: i64,
    pub user_id: i32,
    #[schema(value_type = String, format = DateTime)]
    pub order_date: Timestamp,
    pub total_amount: f64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_accepts_upper_case_id() {
        let json = r#"{
            "ID": 7,
            "CreatedAt": "2024-03-01T10:00:00Z",
            "userId": 3,
            "orderDate": "2024-03-01T10:00:00+02:00",
            "totalAmount": 19.5,
            "status": "shipped"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.user_id, 3);
        assert_eq!(order.total_amount, 19.5);
        assert_eq!(order.status, "shipped");
        assert_eq!(order.order_date.to_string(), "2024-03-01T08:00:00Z");
    }

    #[test]
    fn test_order_accepts_lower_case_id() {
        let json = r#"{
            "id": 1,
            "userId": 3,
            "orderDate": "2024-03-01T10:00:00Z",
            "totalAmount": 0,
            "status": "pending"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.total_amount, 0.0);
    }

    #[test]
    fn test_order_rejects_missing_user_id() {
        let json = r#"{"id": 1, "orderDate": "2024-03-01T10:00:00Z", "totalAmount": 1.0, "status": "x"}"#;
        assert!(serde_json::from_str::<Order>(json).is_err());
    }
}
