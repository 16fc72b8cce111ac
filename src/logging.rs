//! 日志初始化

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认日志过滤规则
pub const DEFAULT_FILTER: &str = "docgen_rs=info";

/// 初始化全局日志订阅器
///
/// 优先使用 `RUST_LOG` 环境变量，否则使用 `default_filter`。
/// 已初始化时返回 `false`。
pub fn init_logging(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(DEFAULT_FILTER);
        assert!(!init_logging(DEFAULT_FILTER));
    }
}
