use chrono::Utc;
use chrono_tz::Asia::Shanghai;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志时间统一用上海时区，与交易日口径一致
struct ShanghaiTime;

impl FormatTime for ShanghaiTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now().with_timezone(&Shanghai);
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// 控制台始终输出；设置 LOG_TO_FILE 后追加按天轮转的文件日志
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));

    let console_layer = fmt::layer()
        .with_timer(ShanghaiTime)
        .with_target(true)
        .with_line_number(true);

    let file_layer = std::env::var("LOG_TO_FILE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
        .then(|| {
            let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
            let appender =
                RollingFileAppender::new(Rotation::DAILY, log_dir, "flowinsight-backend.log");
            fmt::layer()
                .with_timer(ShanghaiTime)
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();
}
