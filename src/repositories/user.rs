use chrono::NaiveDateTime;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::OptionalExtension;

use crate::models::{NewUser, User};
use crate::schema::users::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create(conn: &mut PgPoolConn, new_user: &NewUser) -> Result<User, diesel::result::Error> {
    diesel::insert_into(users)
        .values(new_user)
        .get_result(conn)
}

pub fn find_by_id(conn: &mut PgPoolConn, id: i32) -> Result<Option<User>, diesel::result::Error> {
    users.find(id).first::<User>(conn).optional()
}

pub fn find_by_username(
    conn: &mut PgPoolConn,
    name: &str,
) -> Result<Option<User>, diesel::result::Error> {
    users
        .filter(username.eq(name))
        .first::<User>(conn)
        .optional()
}

pub fn find_by_email(
    conn: &mut PgPoolConn,
    addr: &str,
) -> Result<Option<User>, diesel::result::Error> {
    users.filter(email.eq(addr)).first::<User>(conn).optional()
}

/// 登录成功后更新登录时间与累计次数
pub fn record_login(
    conn: &mut PgPoolConn,
    id: i32,
    at: NaiveDateTime,
) -> Result<usize, diesel::result::Error> {
    diesel::update(users.find(id))
        .set((last_login_at.eq(Some(at)), login_count.eq(login_count + 1)))
        .execute(conn)
}
