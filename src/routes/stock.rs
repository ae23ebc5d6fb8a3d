use axum::{routing::get, Router};

use crate::app::AppState;
use crate::handler::stock::{get_stock_capital_flow, get_stock_detail};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:code", get(get_stock_detail))
        .route("/:code/capital-flow", get(get_stock_capital_flow))
}
