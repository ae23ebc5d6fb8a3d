use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;
use crate::handler::auth::{login, logout, me, register};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
}
