//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu product (菜品)
///
/// `price` is the authoritative unit price; client-submitted prices are
/// never trusted when totalling an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub is_available: bool,
    pub created_at: i64,
}
