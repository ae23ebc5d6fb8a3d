use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api_models::capital_flow::{FlowHistoryResponse, FlowQuery};
use crate::api_models::stock::StockDetailResponse;
use crate::api_models::ApiResponse;
use crate::app::AppState;
use crate::handler::capital_flow;
use crate::handler::error::AppError;
use crate::services::stock_sync;

/// 股票详情，数据库没有时从排行榜回源并保存
pub async fn get_stock_detail(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<StockDetailResponse>>, AppError> {
    let mut conn = state.db_pool.get()?;

    let stock = stock_sync::get_or_fetch_stock(&mut conn, state.lookup.as_ref(), &code)
        .await?
        .ok_or_else(|| AppError::NotFound("股票不存在".to_string()))?;

    Ok(Json(ApiResponse::ok(stock.into())))
}

/// /stocks/{code}/capital-flow 与 /capital-flow/stock/{code} 等价
pub async fn get_stock_capital_flow(
    state: State<AppState>,
    code: Path<String>,
    query: Query<FlowQuery>,
) -> Result<Json<ApiResponse<FlowHistoryResponse>>, AppError> {
    capital_flow::get_stock_flow(state, code, query).await
}
