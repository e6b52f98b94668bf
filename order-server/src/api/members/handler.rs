//! Member API Handlers

use axum::extract::{Path, State};

use crate::core::ServerState;
use shared::{ApiResponse, AppResult};

/// Points balance for a phone number
#[derive(Debug, serde::Serialize)]
pub struct MemberPoints {
    pub phone: String,
    pub points: i64,
}

/// GET /api/members/:phone - 查詢會員點數
///
/// 未註冊的電話回傳 0 點，不會建立會員。會員要等到第一張訂單才成立。
pub async fn get_by_phone(
    State(state): State<ServerState>,
    Path(phone): Path<String>,
) -> AppResult<ApiResponse<MemberPoints>> {
    let points = state
        .members()
        .find_by_phone(&phone)?
        .map(|member| member.points)
        .unwrap_or(0);

    Ok(ApiResponse::success(MemberPoints { phone, points }))
}
