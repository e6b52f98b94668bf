//! API routes
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`products`] - menu catalog
//! - [`members`] - loyalty member lookup
//! - [`orders`] - order intake, queries, print lifecycle
//! - [`ws`] - realtime viewer WebSocket

pub mod health;
pub mod members;
pub mod orders;
pub mod products;
pub mod ws;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(members::router())
        .merge(orders::router())
        .merge(ws::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
