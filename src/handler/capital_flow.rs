use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api_models::capital_flow::{
    FlowHistoryResponse, FlowQuery, RankPageResponse, RankQuery, StockBrief,
};
use crate::api_models::ApiResponse;
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::services::eastmoney::parse_rank;
use crate::services::flow_history;

/// 实时资金流向排行榜，直接透传上游，不落库
pub async fn get_rank(
    State(state): State<AppState>,
    Query(q): Query<RankQuery>,
) -> Result<Json<ApiResponse<RankPageResponse>>, AppError> {
    let page = q.page.max(1);
    let page_size = q.page_size.clamp(1, 100);

    let data = state
        .em_client
        .fetch_rank(page, page_size, &q.sort_field)
        .await
        .ok_or_else(|| AppError::Internal("获取上游数据失败".to_string()))?;

    let items = parse_rank(&data);
    let total = data
        .get("total")
        .and_then(|v| v.as_i64())
        .unwrap_or(items.len() as i64);

    Ok(Json(ApiResponse::ok(RankPageResponse {
        total,
        page,
        page_size,
        total_pages: (total + page_size - 1) / page_size,
        items,
    })))
}

/// 个股资金流向历史：优先读库，窗口为空时回源补齐后再查
pub async fn get_stock_flow(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(q): Query<FlowQuery>,
) -> Result<Json<ApiResponse<FlowHistoryResponse>>, AppError> {
    let days = q.days.clamp(1, 365);
    let mut conn = state.db_pool.get()?;

    let result = flow_history::get_flow_history(
        &mut conn,
        &state.em_client,
        state.lookup.as_ref(),
        &code,
        days,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("股票不存在".to_string()))?;

    let flows: Vec<_> = result.flows.iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(FlowHistoryResponse {
        stock: StockBrief::from(&result.stock),
        total: flows.len(),
        flows,
    })))
}
