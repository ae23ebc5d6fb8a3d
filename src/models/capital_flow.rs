use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::schema::capital_flows;

/// 一只股票一个交易日的资金流向，(stock_id, trade_date) 唯一，
/// 入库后不再修改
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = capital_flows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CapitalFlow {
    pub flow_id: i64,
    pub stock_id: i32,
    pub trade_date: NaiveDate,
    pub main_inflow: BigDecimal,
    pub main_inflow_rate: BigDecimal,
    pub super_inflow: BigDecimal,
    pub super_inflow_rate: BigDecimal,
    pub large_inflow: BigDecimal,
    pub large_inflow_rate: BigDecimal,
    pub medium_inflow: BigDecimal,
    pub medium_inflow_rate: BigDecimal,
    pub small_inflow: BigDecimal,
    pub small_inflow_rate: BigDecimal,
    pub close_price: BigDecimal,
    pub change_percent: BigDecimal,
    pub volume: i64,
    pub amount: BigDecimal,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = capital_flows)]
pub struct NewCapitalFlow {
    pub stock_id: i32,
    pub trade_date: NaiveDate,
    pub main_inflow: BigDecimal,
    pub main_inflow_rate: BigDecimal,
    pub super_inflow: BigDecimal,
    pub super_inflow_rate: BigDecimal,
    pub large_inflow: BigDecimal,
    pub large_inflow_rate: BigDecimal,
    pub medium_inflow: BigDecimal,
    pub medium_inflow_rate: BigDecimal,
    pub small_inflow: BigDecimal,
    pub small_inflow_rate: BigDecimal,
    pub close_price: BigDecimal,
    pub change_percent: BigDecimal,
    pub volume: i64,
    pub amount: BigDecimal,
}
