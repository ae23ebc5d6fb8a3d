use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::OptionalExtension;

use crate::models::{Holding, NewHolding, UpdateHolding};
use crate::schema::holdings::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create(
    conn: &mut PgPoolConn,
    new_item: &NewHolding,
) -> Result<Holding, diesel::result::Error> {
    diesel::insert_into(holdings)
        .values(new_item)
        .get_result(conn)
}

pub fn list_by_user(
    conn: &mut PgPoolConn,
    uid: i32,
) -> Result<Vec<Holding>, diesel::result::Error> {
    holdings
        .filter(user_id.eq(uid))
        .order(created_at.desc())
        .load(conn)
}

pub fn find_for_user(
    conn: &mut PgPoolConn,
    uid: i32,
    id: i32,
) -> Result<Option<Holding>, diesel::result::Error> {
    holdings
        .filter(user_id.eq(uid))
        .filter(holding_id.eq(id))
        .first::<Holding>(conn)
        .optional()
}

/// 一个用户对同一只股票至多一条持仓
pub fn exists_for_user(
    conn: &mut PgPoolConn,
    uid: i32,
    code: &str,
) -> Result<bool, diesel::result::Error> {
    let existing = holdings
        .filter(user_id.eq(uid))
        .filter(stock_code.eq(code))
        .select(holding_id)
        .first::<i32>(conn)
        .optional()?;
    Ok(existing.is_some())
}

pub fn update_for_user(
    conn: &mut PgPoolConn,
    uid: i32,
    id: i32,
    update_data: &UpdateHolding,
) -> Result<Holding, diesel::result::Error> {
    diesel::update(
        holdings
            .filter(user_id.eq(uid))
            .filter(holding_id.eq(id)),
    )
    .set(update_data)
    .get_result(conn)
}

pub fn delete_for_user(
    conn: &mut PgPoolConn,
    uid: i32,
    id: i32,
) -> Result<usize, diesel::result::Error> {
    diesel::delete(
        holdings
            .filter(user_id.eq(uid))
            .filter(holding_id.eq(id)),
    )
    .execute(conn)
}
