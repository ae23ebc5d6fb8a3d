pub mod capital_flow;
pub mod holding;
pub mod stock;
pub mod user;
pub mod watchlist;
