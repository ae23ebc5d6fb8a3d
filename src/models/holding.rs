use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::schema::holdings;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = holdings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Holding {
    pub holding_id: i32,
    pub user_id: i32,
    pub stock_id: i32,
    pub stock_code: String,
    pub cost_price: BigDecimal,
    pub quantity: i32,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = holdings)]
pub struct NewHolding {
    pub user_id: i32,
    pub stock_id: i32,
    pub stock_code: String,
    pub cost_price: BigDecimal,
    pub quantity: i32,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = holdings)]
pub struct UpdateHolding {
    pub cost_price: Option<BigDecimal>,
    pub quantity: Option<i32>,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}
