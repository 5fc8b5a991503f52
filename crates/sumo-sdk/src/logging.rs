//! 日志初始化
//!
//! 安装 `tracing-subscriber` fmt 订阅者（`EnvFilter`，默认 `info`，可由 `RUST_LOG`
//! 覆盖），并把 `log` crate 的记录桥接到 `tracing`。重复调用无副作用。

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// 以默认级别 `info` 初始化日志
pub fn init_logger() {
    init_logger_with_filter("info");
}

/// 以指定默认过滤规则初始化日志（`RUST_LOG` 优先）
///
/// # 参数
///
/// - `default_filter`: 如 `"info"`、`"sumo_control=debug,info"`
pub fn init_logger_with_filter(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_names(true)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            log::debug!("tracing subscriber already installed");
        }

        // 其他库可能已安装 log 桥接，忽略错误
        let _ = tracing_log::LogTracer::init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_is_idempotent() {
        init_logger();
        init_logger();
        init_logger_with_filter("debug");
        tracing::info!("logger initialized");
    }
}
