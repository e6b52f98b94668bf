//! Health check

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::core::ServerState;
use shared::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(serde::Serialize)]
struct HealthInfo {
    status: &'static str,
    viewers: usize,
}

async fn health(State(state): State<ServerState>) -> ApiResponse<HealthInfo> {
    ApiResponse::success(HealthInfo {
        status: "ok",
        viewers: state.hub.viewer_count(),
    })
}
