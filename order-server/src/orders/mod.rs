//! Order intake
//!
//! [`pricer`] validates a draft against the catalog and computes the
//! authoritative total; [`pipeline`] runs the full submission flow
//! (pricing, loyalty ledger, persistence, broadcast).

pub mod pipeline;
pub mod pricer;

pub use pipeline::{OrderOutcome, OrderPipeline};
pub use pricer::{DraftItem, OrderDraft, PricedOrder};
