use bigdecimal::ToPrimitive;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CapitalFlow, Stock};
use crate::services::eastmoney::RankRow;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    50
}

fn default_sort_field() -> String {
    "f62".to_string()
}

fn default_days() -> i64 {
    30
}

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// f62-今日主力, f204-5日主力, f205-10日主力
    #[serde(default = "default_sort_field")]
    pub sort_field: String,
}

#[derive(Debug, Deserialize)]
pub struct FlowQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

#[derive(Debug, Serialize)]
pub struct RankPageResponse {
    pub items: Vec<RankRow>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct StockBrief {
    pub stock_id: i32,
    pub stock_code: String,
    pub stock_name: String,
    pub exchange: String,
}

impl From<&Stock> for StockBrief {
    fn from(stock: &Stock) -> Self {
        Self {
            stock_id: stock.stock_id,
            stock_code: stock.stock_code.clone(),
            stock_name: stock.stock_name.clone(),
            exchange: stock.exchange.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlowRecordResponse {
    pub trade_date: NaiveDate,
    pub main_inflow: f64,
    pub main_inflow_rate: f64,
    pub super_inflow: f64,
    pub super_inflow_rate: f64,
    pub large_inflow: f64,
    pub large_inflow_rate: f64,
    pub medium_inflow: f64,
    pub medium_inflow_rate: f64,
    pub small_inflow: f64,
    pub small_inflow_rate: f64,
    pub close_price: f64,
    pub change_percent: f64,
    pub volume: i64,
    pub amount: f64,
}

impl From<&CapitalFlow> for FlowRecordResponse {
    fn from(flow: &CapitalFlow) -> Self {
        Self {
            trade_date: flow.trade_date,
            main_inflow: flow.main_inflow.to_f64().unwrap_or(0.0),
            main_inflow_rate: flow.main_inflow_rate.to_f64().unwrap_or(0.0),
            super_inflow: flow.super_inflow.to_f64().unwrap_or(0.0),
            super_inflow_rate: flow.super_inflow_rate.to_f64().unwrap_or(0.0),
            large_inflow: flow.large_inflow.to_f64().unwrap_or(0.0),
            large_inflow_rate: flow.large_inflow_rate.to_f64().unwrap_or(0.0),
            medium_inflow: flow.medium_inflow.to_f64().unwrap_or(0.0),
            medium_inflow_rate: flow.medium_inflow_rate.to_f64().unwrap_or(0.0),
            small_inflow: flow.small_inflow.to_f64().unwrap_or(0.0),
            small_inflow_rate: flow.small_inflow_rate.to_f64().unwrap_or(0.0),
            close_price: flow.close_price.to_f64().unwrap_or(0.0),
            change_percent: flow.change_percent.to_f64().unwrap_or(0.0),
            volume: flow.volume,
            amount: flow.amount.to_f64().unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlowHistoryResponse {
    pub stock: StockBrief,
    pub flows: Vec<FlowRecordResponse>,
    pub total: usize,
}
