use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateWatchlistRequest {
    pub stock_code: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistItemResponse {
    pub watch_id: i32,
    pub stock_code: String,
    pub stock_name: String,
    /// 实时字段来自排行榜快照，拿不到时为 null
    pub current_price: Option<f64>,
    pub change_percent: Option<f64>,
    pub main_inflow: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
