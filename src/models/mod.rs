pub mod capital_flow;
pub mod holding;
pub mod stock;
pub mod user;
pub mod watchlist;

pub use capital_flow::{CapitalFlow, NewCapitalFlow};
pub use holding::{Holding, NewHolding, UpdateHolding};
pub use stock::{NewStock, Stock, SyncStockUpdate};
pub use user::{NewUser, User};
pub use watchlist::{NewWatchlistEntry, WatchlistEntry};
