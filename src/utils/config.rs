use std::net::SocketAddr;
use std::time::Duration;

/// 应用配置，进程启动时从环境变量构建一次，
/// 之后以引用方式传给各组件，不使用全局单例
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub eastmoney: EastmoneyConfig,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expire_minutes: i64,
}

/// 股票查不到时的上游回源方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// 拉取排行榜第一页后线性扫描（默认，覆盖不完整）
    RankPage,
    /// 按 secid 直接查询个股行情接口
    Direct,
}

#[derive(Debug, Clone)]
pub struct EastmoneyConfig {
    pub base_url: String,
    pub history_url: String,
    pub timeout: Duration,
    pub rank_page_size: i64,
    pub lookup_mode: LookupMode,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8887);
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .expect("Invalid HOST/PORT");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").expect("JWT_SECRET not set"),
            expire_minutes: std::env::var("JWT_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        };

        let lookup_mode = match std::env::var("EASTMONEY_LOOKUP_MODE").as_deref() {
            Ok("direct") => LookupMode::Direct,
            _ => LookupMode::RankPage,
        };

        let eastmoney = EastmoneyConfig {
            base_url: std::env::var("EASTMONEY_BASE_URL")
                .unwrap_or_else(|_| "http://push2.eastmoney.com".to_string()),
            history_url: std::env::var("EASTMONEY_HISTORY_URL")
                .unwrap_or_else(|_| "http://push2his.eastmoney.com".to_string()),
            timeout: Duration::from_secs(
                std::env::var("EASTMONEY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            rank_page_size: std::env::var("EASTMONEY_RANK_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            lookup_mode,
        };

        Self {
            addr,
            database_url,
            jwt,
            eastmoney,
        }
    }
}
