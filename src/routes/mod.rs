use axum::Router;

use crate::app::AppState;

mod auth;
mod capital_flow;
mod holding;
mod root;
mod stock;
mod watchlist;

pub fn build_routes() -> Router<AppState> {
    Router::new()
        // 根路径与健康检查
        .merge(root::router())
        // 业务 API 统一挂在 /api/v1 前缀下
        .nest(
            "/api/v1",
            Router::new()
                .nest("/auth", auth::router())
                .nest("/capital-flow", capital_flow::router())
                .nest("/stocks", stock::router())
                .nest("/holdings", holding::router())
                .nest("/watchlist", watchlist::router()),
        )
}
