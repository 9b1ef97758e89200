//! Logging 日志模块
//!
//! 提供 Stockdash 的默认 Tracing 日志初始化器。
//!
//! 日志级别默认为 `INFO`，可以通过 `RUST_LOG` 环境变量覆盖，例如
//! `RUST_LOG=stockdash=debug,stockdash_data=debug`。

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// 初始化人类可读格式的默认 Stockdash 日志。
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_ansi(cfg!(debug_assertions)))
        .init()
}

/// 初始化 JSON 格式的默认 Stockdash 日志，适用于日志采集。
pub fn init_json_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false),
        )
        .init()
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}
