//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, waiting for the kitchen
    Pending,
    /// Being prepared
    InProgress,
    /// Ready for pickup
    Ready,
    /// Completed and hidden from active views
    Archived,
}

impl OrderStatus {
    pub fn is_archived(self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Archived => "ARCHIVED",
        };
        write!(f, "{}", s)
    }
}

/// Order header
///
/// `total_price` is server-computed from catalog prices at creation time
/// and never changes afterwards. `order_number` is the short pickup code
/// shown to the customer (last six digits of the phone).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_printed: bool,
    /// Points debited for this order's redemption, 0 if none
    pub redeemed_points: i64,
    pub created_at: i64,
    /// Requested pickup time, epoch millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_at: Option<i64>,
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl OrderItem {
    /// Line total (unit price × quantity)
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order with its items, the shape served to viewers and the printer bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
