pub mod auth;
pub mod capital_flow;
pub mod error;
pub mod holding;
pub mod stock;
pub mod watchlist;
