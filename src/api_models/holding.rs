use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateHoldingRequest {
    pub stock_code: String,
    pub cost_price: f64,
    pub quantity: i32,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHoldingRequest {
    pub cost_price: Option<f64>,
    pub quantity: Option<i32>,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HoldingResponse {
    pub holding_id: i32,
    pub stock_code: String,
    pub stock_name: String,
    pub cost_price: f64,
    pub quantity: i32,
    pub buy_date: Option<NaiveDate>,
    /// 实时价与盈亏来自排行榜快照，拿不到时为 null
    pub current_price: Option<f64>,
    pub profit_loss: Option<f64>,
    pub profit_loss_rate: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
