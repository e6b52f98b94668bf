//! Order API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;

use crate::core::ServerState;
use crate::orders::{DraftItem, OrderDraft, OrderOutcome};
use shared::models::{Order, OrderDetail, OrderStatus};
use shared::util::now_millis;
use shared::{ApiResponse, AppError, AppResult, RealtimeMessage};

/// Incoming order payload, camelCase to match the web frontend
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<RequestedItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub redeem_requested: bool,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
    pub product_id: String,
    pub quantity: u32,
}

impl From<CreateOrderRequest> for OrderDraft {
    fn from(req: CreateOrderRequest) -> Self {
        OrderDraft {
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            items: req
                .items
                .into_iter()
                .map(|item| DraftItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            notes: req.notes,
            pickup_time: req.pickup_time,
            redeem_requested: req.redeem_requested,
        }
    }
}

/// POST /api/orders - 下單
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderOutcome>>)> {
    let outcome = state.pipeline().submit(payload.into())?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(outcome))))
}

/// GET /api/orders/pending-print - 待列印訂單（舊到新）
pub async fn pending_print(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<OrderDetail>>> {
    let pending = state.orders().find_pending_print()?;
    Ok(ApiResponse::success(pending))
}

/// GET /api/orders/archived - 最近封存訂單
pub async fn archived(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<OrderDetail>>> {
    let cutoff = now_millis()
        - Duration::days(state.config.archive_lookback_days).num_milliseconds();
    let orders = state.orders().find_archived_since(cutoff)?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/orders/query/:phone - 以電話查詢未封存訂單（新到舊）
///
/// 查無有效訂單回 404，封存後的訂單視同不存在。
pub async fn query_by_phone(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> AppResult<ApiResponse<Vec<OrderDetail>>> {
    let orders = state.orders().find_by_phone(&phone)?;
    if orders.is_empty() {
        return Err(AppError::with_message(
            shared::ErrorCode::OrderNotFound,
            format!("No active orders for {phone}"),
        ));
    }
    Ok(ApiResponse::success(orders))
}

/// GET /api/orders/:id - 單筆訂單
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OrderDetail>> {
    let detail = state
        .orders()
        .find_by_id(&id)?
        .ok_or_else(|| AppError::order_not_found(id))?;
    Ok(ApiResponse::success(detail))
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// PATCH /api/orders/:id/status - 更新訂單狀態
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.orders().update_status(&id, payload.status)?;

    state.hub.publish(&RealtimeMessage::OrderStatusChanged {
        order_id: order.id.clone(),
        status: order.status,
    });

    Ok(ApiResponse::success(order))
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPrintedResult {
    pub already_printed: bool,
}

/// POST /api/orders/:id/mark-as-printed - 回報已列印（可重複呼叫）
pub async fn mark_as_printed(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MarkPrintedResult>> {
    let already_printed = state.orders().mark_printed(&id)?;

    if already_printed {
        tracing::debug!(order_id = %id, "Duplicate print acknowledgement");
    } else {
        tracing::info!(order_id = %id, "Order marked as printed");
    }

    Ok(ApiResponse::success(MarkPrintedResult { already_printed }))
}
