use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::OptionalExtension;

use crate::models::{NewStock, Stock, SyncStockUpdate};
use crate::schema::stocks::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create(conn: &mut PgPoolConn, new_stock: &NewStock) -> Result<Stock, diesel::result::Error> {
    diesel::insert_into(stocks)
        .values(new_stock)
        .get_result(conn)
}

pub fn find_by_code(
    conn: &mut PgPoolConn,
    code: &str,
) -> Result<Option<Stock>, diesel::result::Error> {
    stocks
        .filter(stock_code.eq(code))
        .first::<Stock>(conn)
        .optional()
}

pub fn find_by_id(conn: &mut PgPoolConn, id: i32) -> Result<Option<Stock>, diesel::result::Error> {
    stocks.find(id).first::<Stock>(conn).optional()
}

/// 同步覆盖展示字段（按代码定位）
pub fn update_sync(
    conn: &mut PgPoolConn,
    code: &str,
    update_data: &SyncStockUpdate,
) -> Result<Stock, diesel::result::Error> {
    diesel::update(stocks.filter(stock_code.eq(code)))
        .set(update_data)
        .get_result(conn)
}
