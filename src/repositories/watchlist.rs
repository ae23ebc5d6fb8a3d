use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::OptionalExtension;

use crate::models::{NewWatchlistEntry, WatchlistEntry};
use crate::schema::watchlist::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create(
    conn: &mut PgPoolConn,
    new_item: &NewWatchlistEntry,
) -> Result<WatchlistEntry, diesel::result::Error> {
    diesel::insert_into(watchlist)
        .values(new_item)
        .get_result(conn)
}

pub fn list_by_user(
    conn: &mut PgPoolConn,
    uid: i32,
) -> Result<Vec<WatchlistEntry>, diesel::result::Error> {
    watchlist
        .filter(user_id.eq(uid))
        .order(created_at.desc())
        .load(conn)
}

/// 一个用户对同一只股票至多一条收藏
pub fn exists_for_user(
    conn: &mut PgPoolConn,
    uid: i32,
    code: &str,
) -> Result<bool, diesel::result::Error> {
    let existing = watchlist
        .filter(user_id.eq(uid))
        .filter(stock_code.eq(code))
        .select(watch_id)
        .first::<i32>(conn)
        .optional()?;
    Ok(existing.is_some())
}

pub fn delete_for_user(
    conn: &mut PgPoolConn,
    uid: i32,
    id: i32,
) -> Result<usize, diesel::result::Error> {
    diesel::delete(
        watchlist
            .filter(user_id.eq(uid))
            .filter(watch_id.eq(id)),
    )
    .execute(conn)
}
