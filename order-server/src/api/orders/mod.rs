//! Order API 模块

mod handler;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/pending-print", get(handler::pending_print))
        .route("/archived", get(handler::archived))
        .route("/query/{phone}", get(handler::query_by_phone))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/mark-as-printed", post(handler::mark_as_printed))
}
