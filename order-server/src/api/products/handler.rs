//! Product API Handlers

use axum::extract::State;

use crate::core::ServerState;
use shared::models::Product;
use shared::{ApiResponse, AppResult};

/// GET /api/products - 取得菜單
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = state.products().find_all()?;
    Ok(ApiResponse::success(products))
}
