use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// 本地前端开发端口，ALLOWED_ORIGINS 未配置时放行这些
const DEV_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:8080",
];

pub fn cors_layer() -> CorsLayer {
    let configured: Vec<HeaderValue> = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let origins = if configured.is_empty() {
        DEV_ORIGINS
            .iter()
            .map(|o| HeaderValue::from_static(o))
            .collect()
    } else {
        configured
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
