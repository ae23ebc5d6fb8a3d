use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::OptionalExtension;

use crate::models::{CapitalFlow, NewCapitalFlow};
use crate::schema::capital_flows::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create(
    conn: &mut PgPoolConn,
    new_flow: &NewCapitalFlow,
) -> Result<CapitalFlow, diesel::result::Error> {
    diesel::insert_into(capital_flows)
        .values(new_flow)
        .get_result(conn)
}

/// 查询某只股票在 [start, end] 区间内的流向记录，按交易日倒序
pub fn find_in_window(
    conn: &mut PgPoolConn,
    sid: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CapitalFlow>, diesel::result::Error> {
    capital_flows
        .filter(stock_id.eq(sid))
        .filter(trade_date.ge(start))
        .filter(trade_date.le(end))
        .order(trade_date.desc())
        .load(conn)
}

pub fn exists_by_date(
    conn: &mut PgPoolConn,
    sid: i32,
    date: NaiveDate,
) -> Result<bool, diesel::result::Error> {
    let existing = capital_flows
        .filter(stock_id.eq(sid))
        .filter(trade_date.eq(date))
        .select(flow_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(existing.is_some())
}
