//! Realtime messages pushed to connected viewers

use crate::models::OrderDetail;
use serde::{Deserialize, Serialize};

/// Event envelope sent over the viewer WebSocket
///
/// `type` discriminates the event; the payload carries the full order so
/// dashboards can render without a follow-up fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RealtimeMessage {
    NewOrder(OrderDetail),
    #[serde(rename_all = "camelCase")]
    OrderStatusChanged {
        order_id: String,
        status: crate::models::OrderStatus,
    },
}

impl RealtimeMessage {
    pub fn new_order(detail: OrderDetail) -> Self {
        Self::NewOrder(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, OrderStatus};
    use rust_decimal::Decimal;

    #[test]
    fn test_new_order_envelope() {
        let detail = OrderDetail {
            order: Order {
                id: "o-1".to_string(),
                customer_name: "test".to_string(),
                customer_phone: "0912345678".to_string(),
                order_number: "345678".to_string(),
                total_price: Decimal::from(100),
                status: OrderStatus::Pending,
                notes: None,
                is_printed: false,
                redeemed_points: 0,
                created_at: 0,
                pickup_at: None,
            },
            items: vec![],
        };
        let json = serde_json::to_value(RealtimeMessage::new_order(detail)).unwrap();
        assert_eq!(json["type"], "new_order");
        assert_eq!(json["payload"]["orderNumber"], "345678");
    }

    #[test]
    fn test_status_changed_envelope() {
        let msg = RealtimeMessage::OrderStatusChanged {
            order_id: "o-1".to_string(),
            status: OrderStatus::Ready,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "order_status_changed");
        assert_eq!(json["payload"]["status"], "READY");
    }
}
