use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::Utc;
use serde_json::{json, Value};

use crate::api_models::holding::{CreateHoldingRequest, HoldingResponse, UpdateHoldingRequest};
use crate::api_models::ApiResponse;
use crate::app::AppState;
use crate::handler::auth::AuthUser;
use crate::handler::error::AppError;
use crate::models::{Holding, NewHolding, UpdateHolding};
use crate::repositories::{holding as holding_repo, stock as stock_repo};
use crate::services::eastmoney::RankRow;
use crate::services::stock_sync;

fn to_response(
    holding: &Holding,
    stock_name: String,
    snapshot: Option<&RankRow>,
) -> HoldingResponse {
    let cost_price = holding.cost_price.to_f64().unwrap_or(0.0);
    let current_price = snapshot.map(|row| row.current_price);

    // 盈亏 = 市值 - 成本，比例按成本折百分比
    let (profit_loss, profit_loss_rate) = match current_price {
        Some(price) => {
            let total_cost = cost_price * holding.quantity as f64;
            let total_value = price * holding.quantity as f64;
            let pl = total_value - total_cost;
            let rate = if total_cost > 0.0 {
                pl / total_cost * 100.0
            } else {
                0.0
            };
            (Some(pl), Some(rate))
        }
        None => (None, None),
    };

    HoldingResponse {
        holding_id: holding.holding_id,
        stock_code: holding.stock_code.clone(),
        stock_name,
        cost_price,
        quantity: holding.quantity,
        buy_date: holding.buy_date,
        current_price,
        profit_loss,
        profit_loss_rate,
        notes: holding.notes.clone(),
        created_at: holding.created_at,
    }
}

/// 当前用户持仓列表，用一次排行榜快照补实时价并计算盈亏
pub async fn list_holdings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<HoldingResponse>>>, AppError> {
    let mut conn = state.db_pool.get()?;
    let items = holding_repo::list_by_user(&mut conn, user.user_id)?;

    let snapshot: HashMap<String, RankRow> = state
        .em_client
        .rank_snapshot(state.config.eastmoney.rank_page_size)
        .await;

    let mut result = Vec::with_capacity(items.len());
    for holding in &items {
        let stock_name = stock_repo::find_by_id(&mut conn, holding.stock_id)?
            .map(|s| s.stock_name)
            .unwrap_or_else(|| holding.stock_code.clone());
        result.push(to_response(
            holding,
            stock_name,
            snapshot.get(&holding.stock_code),
        ));
    }

    Ok(Json(ApiResponse::ok(result)))
}

pub async fn create_holding(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateHoldingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HoldingResponse>>), AppError> {
    let mut conn = state.db_pool.get()?;

    // 股票建档与读穿查询共用同一条路径
    let stock = stock_sync::get_or_fetch_stock(&mut conn, state.lookup.as_ref(), &payload.stock_code)
        .await?
        .ok_or_else(|| AppError::NotFound("股票不存在".to_string()))?;

    if holding_repo::exists_for_user(&mut conn, user.user_id, &payload.stock_code)? {
        return Err(AppError::Conflict("该股票已在持股列表中".to_string()));
    }

    let new_holding = NewHolding {
        user_id: user.user_id,
        stock_id: stock.stock_id,
        stock_code: payload.stock_code,
        cost_price: BigDecimal::from_str(&payload.cost_price.to_string())
            .map_err(|_| AppError::BadRequest("成本价不合法".to_string()))?,
        quantity: payload.quantity,
        buy_date: payload.buy_date,
        notes: payload.notes,
    };
    let created = holding_repo::create(&mut conn, &new_holding)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(to_response(&created, stock.stock_name, None))),
    ))
}

pub async fn update_holding(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(holding_id): Path<i32>,
    Json(payload): Json<UpdateHoldingRequest>,
) -> Result<Json<ApiResponse<HoldingResponse>>, AppError> {
    let mut conn = state.db_pool.get()?;

    let existing = holding_repo::find_for_user(&mut conn, user.user_id, holding_id)?
        .ok_or_else(|| AppError::NotFound("持股记录不存在".to_string()))?;

    let cost_price = match payload.cost_price {
        Some(v) => Some(
            BigDecimal::from_str(&v.to_string())
                .map_err(|_| AppError::BadRequest("成本价不合法".to_string()))?,
        ),
        None => None,
    };

    let update = UpdateHolding {
        cost_price,
        quantity: payload.quantity,
        buy_date: payload.buy_date,
        notes: payload.notes,
        updated_at: Some(Utc::now().naive_utc()),
    };
    let updated = holding_repo::update_for_user(&mut conn, user.user_id, holding_id, &update)?;

    let stock_name = stock_repo::find_by_id(&mut conn, existing.stock_id)?
        .map(|s| s.stock_name)
        .unwrap_or_else(|| updated.stock_code.clone());

    Ok(Json(ApiResponse::ok(to_response(&updated, stock_name, None))))
}

pub async fn delete_holding(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(holding_id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let mut conn = state.db_pool.get()?;

    let affected = holding_repo::delete_for_user(&mut conn, user.user_id, holding_id)?;
    if affected == 0 {
        return Err(AppError::NotFound("持股记录不存在".to_string()));
    }

    Ok(Json(ApiResponse::ok(json!({"message": "删除成功"}))))
}
