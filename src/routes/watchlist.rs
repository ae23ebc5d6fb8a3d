use axum::{
    routing::{delete, get},
    Router,
};

use crate::app::AppState;
use crate::handler::watchlist::{add_to_watchlist, list_watchlist, remove_from_watchlist};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_watchlist).post(add_to_watchlist))
        .route("/:watch_id", delete(remove_from_watchlist))
}
