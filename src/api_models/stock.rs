use bigdecimal::ToPrimitive;
use serde::Serialize;

use crate::models::Stock;

#[derive(Debug, Serialize)]
pub struct StockDetailResponse {
    pub stock_id: i32,
    pub stock_code: String,
    pub stock_name: String,
    pub exchange: String,
    pub secid: String,
    pub industry: Option<String>,
    pub area: Option<String>,
    pub market_cap: Option<f64>,
    pub circulation_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub status: String,
}

impl From<Stock> for StockDetailResponse {
    fn from(stock: Stock) -> Self {
        Self {
            stock_id: stock.stock_id,
            stock_code: stock.stock_code,
            stock_name: stock.stock_name,
            exchange: stock.exchange,
            secid: stock.secid,
            industry: stock.industry,
            area: stock.area,
            market_cap: stock.market_cap.as_ref().and_then(|v| v.to_f64()),
            circulation_cap: stock.circulation_cap.as_ref().and_then(|v| v.to_f64()),
            pe_ratio: stock.pe_ratio.as_ref().and_then(|v| v.to_f64()),
            pb_ratio: stock.pb_ratio.as_ref().and_then(|v| v.to_f64()),
            status: stock.status,
        }
    }
}
