use axum::{routing::get, Router};

use crate::app::AppState;
use crate::handler::capital_flow::{get_rank, get_stock_flow};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rank", get(get_rank))
        .route("/stock/:code", get(get_stock_flow))
}
