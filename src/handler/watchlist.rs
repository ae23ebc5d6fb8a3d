use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api_models::watchlist::{CreateWatchlistRequest, WatchlistItemResponse};
use crate::api_models::ApiResponse;
use crate::app::AppState;
use crate::handler::auth::AuthUser;
use crate::handler::error::AppError;
use crate::models::{NewWatchlistEntry, WatchlistEntry};
use crate::repositories::{stock as stock_repo, watchlist as watchlist_repo};
use crate::services::eastmoney::RankRow;
use crate::services::stock_sync;

fn to_response(
    entry: &WatchlistEntry,
    stock_name: String,
    snapshot: Option<&RankRow>,
) -> WatchlistItemResponse {
    WatchlistItemResponse {
        watch_id: entry.watch_id,
        stock_code: entry.stock_code.clone(),
        stock_name,
        current_price: snapshot.map(|row| row.current_price),
        change_percent: snapshot.map(|row| row.change_percent),
        main_inflow: snapshot.map(|row| row.main_inflow),
        notes: entry.notes.clone(),
        created_at: entry.created_at,
    }
}

/// 当前用户收藏列表，用一次排行榜快照补实时字段
pub async fn list_watchlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<WatchlistItemResponse>>>, AppError> {
    let mut conn = state.db_pool.get()?;
    let items = watchlist_repo::list_by_user(&mut conn, user.user_id)?;

    let snapshot: HashMap<String, RankRow> = state
        .em_client
        .rank_snapshot(state.config.eastmoney.rank_page_size)
        .await;

    let mut result = Vec::with_capacity(items.len());
    for entry in &items {
        let stock_name = stock_repo::find_by_id(&mut conn, entry.stock_id)?
            .map(|s| s.stock_name)
            .unwrap_or_else(|| entry.stock_code.clone());
        result.push(to_response(entry, stock_name, snapshot.get(&entry.stock_code)));
    }

    Ok(Json(ApiResponse::ok(result)))
}

pub async fn add_to_watchlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateWatchlistRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WatchlistItemResponse>>), AppError> {
    let mut conn = state.db_pool.get()?;

    let stock = stock_sync::get_or_fetch_stock(&mut conn, state.lookup.as_ref(), &payload.stock_code)
        .await?
        .ok_or_else(|| AppError::NotFound("股票不存在".to_string()))?;

    if watchlist_repo::exists_for_user(&mut conn, user.user_id, &payload.stock_code)? {
        return Err(AppError::Conflict("该股票已在收藏列表中".to_string()));
    }

    let new_entry = NewWatchlistEntry {
        user_id: user.user_id,
        stock_id: stock.stock_id,
        stock_code: payload.stock_code,
        notes: payload.notes,
    };
    let created = watchlist_repo::create(&mut conn, &new_entry)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(to_response(&created, stock.stock_name, None))),
    ))
}

pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(watch_id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let mut conn = state.db_pool.get()?;

    let affected = watchlist_repo::delete_for_user(&mut conn, user.user_id, watch_id)?;
    if affected == 0 {
        return Err(AppError::NotFound("收藏记录不存在".to_string()));
    }

    Ok(Json(ApiResponse::ok(json!({"message": "删除成功"}))))
}
