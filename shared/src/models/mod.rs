//! Domain models
//!
//! All wire-facing structs use camelCase field names so JSON payloads
//! stay compatible with the existing web frontend and printer bridge.

mod member;
mod order;
mod product;

pub use member::Member;
pub use order::{Order, OrderDetail, OrderItem, OrderStatus};
pub use product::Product;
