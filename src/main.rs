mod api_models;
mod app;
mod handler;
mod models;
mod repositories;
mod routes;
mod schema;
mod services;
mod utils;

use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    utils::logging::init_logging();

    let cfg = utils::config::AppConfig::from_env();
    let addr: SocketAddr = cfg.addr;
    let app = app::build_app(cfg);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind failed");
    tracing::info!(
        "FlowInsight backend listening on http://{}",
        listener.local_addr().unwrap()
    );
    axum::serve(listener, app).await.expect("server failed");
}
