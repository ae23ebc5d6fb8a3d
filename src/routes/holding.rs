use axum::{
    routing::{delete, get},
    Router,
};

use crate::app::AppState;
use crate::handler::holding::{create_holding, delete_holding, list_holdings, update_holding};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_holdings).post(create_holding))
        .route("/:holding_id", delete(delete_holding).put(update_holding))
}
