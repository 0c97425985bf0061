//! 日志初始化模块
//!
//! 程序入口处调用一次 `logger::init()`，之后各模块直接使用 tracing 宏

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 日志级别可通过 RUST_LOG 环境变量控制，默认 info
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
