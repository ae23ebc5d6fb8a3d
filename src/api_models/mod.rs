pub mod auth;
pub mod capital_flow;
pub mod holding;
pub mod response;
pub mod stock;
pub mod watchlist;

pub use response::ApiResponse;
