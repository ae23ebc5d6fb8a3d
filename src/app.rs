use std::sync::Arc;

use axum::Router;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::routes;
use crate::services::eastmoney::EastmoneyClient;
use crate::services::stock_sync::{lookup_from_config, SecurityLookup};
use crate::utils::config::AppConfig;
use crate::utils::middleware;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub config: Arc<AppConfig>,
    pub em_client: Arc<EastmoneyClient>,
    pub lookup: Arc<dyn SecurityLookup>,
}

pub fn build_app(config: AppConfig) -> Router {
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let db_pool = Pool::builder()
        .build(manager)
        .expect("Failed to create DB pool");

    // 上游客户端全程复用，查档方式由配置决定
    let em_client = Arc::new(
        EastmoneyClient::from_config(&config.eastmoney).expect("Failed to build upstream client"),
    );
    let lookup = lookup_from_config(&config.eastmoney, em_client.clone());

    let state = AppState {
        db_pool,
        config: Arc::new(config),
        em_client,
        lookup,
    };

    build_app_with_state(state)
}

pub fn build_app_with_state(state: AppState) -> Router {
    routes::build_routes()
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
