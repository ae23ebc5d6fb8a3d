use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::watchlist;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = watchlist)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WatchlistEntry {
    pub watch_id: i32,
    pub user_id: i32,
    pub stock_id: i32,
    pub stock_code: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = watchlist)]
pub struct NewWatchlistEntry {
    pub user_id: i32,
    pub stock_id: i32,
    pub stock_code: String,
    pub notes: Option<String>,
}
