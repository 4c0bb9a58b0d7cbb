//! 核心模块
//!
//! 包含：
//! - `error` - 错误类型定义
//! - `macros` - 通用宏
//! - 日志初始化

pub mod error;
#[macro_use]
pub mod macros;

use crate::config::LoggingConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

// 重新导出错误类型
pub use error::{
    ArgError, ArgResult, BridgeError, BridgeResult, ErrorKind, HandleError, HandleResult,
    RayscriptError, RayscriptResult, ScriptError, ScriptResult,
};

/// 初始化日志系统
///
/// 配置tracing日志框架。`RUST_LOG`环境变量存在时优先于配置中的级别。
/// 重复调用是安全的，只有第一次生效。
pub fn init_logging(config: &LoggingConfig) -> RayscriptResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

    if config.log_to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file_path)?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else if config.log_to_console {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    tracing::debug!(target: "rayscript", level = ?config.level, "Logging initialized");
    Ok(())
}
