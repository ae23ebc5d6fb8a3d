use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::stocks;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = stocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stock {
    pub stock_id: i32,
    pub stock_code: String,
    pub stock_name: String,
    pub exchange: String,
    pub market_code: String,
    pub secid: String,
    pub industry: Option<String>,
    pub area: Option<String>,
    pub market_cap: Option<BigDecimal>,
    pub circulation_cap: Option<BigDecimal>,
    pub pe_ratio: Option<BigDecimal>,
    pub pb_ratio: Option<BigDecimal>,
    pub status: String,
    pub last_sync_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = stocks)]
pub struct NewStock {
    pub stock_code: String,
    pub stock_name: String,
    pub exchange: String,
    pub market_code: String,
    pub secid: String,
    pub status: String,
    pub last_sync_at: Option<NaiveDateTime>,
}

/// 再次同步时整体覆盖展示字段，不做合并
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = stocks)]
pub struct SyncStockUpdate {
    pub stock_name: String,
    pub exchange: String,
    pub market_code: String,
    pub secid: String,
    pub last_sync_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}
