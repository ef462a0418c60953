//! logging utilities

use tracing::Dispatch;

/// 独立的日志输出, 用于注入到组装器而不改动全局设置
pub fn dispatch(max_level: tracing::Level) -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(max_level)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .finish();
    Dispatch::new(subscriber)
}
