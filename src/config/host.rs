/// 脚本宿主配置

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use super::{ConfigError, ConfigResult};

/// 桥接层与 headless 后端的运行参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// 句柄表容量，超出后创建句柄失败
    pub max_handles: usize,

    /// 脚本全局对象名
    pub global_name: String,

    /// StorageSaveValue/StorageLoadValue 使用的文件
    pub storage_file: PathBuf,

    /// 是否允许 openURL 真正打开浏览器
    pub allow_open_url: bool,

    /// headless 后端保留的原生调用记录条数，0 表示只计数
    pub call_log_limit: usize,

    /// headless 后端是否按目标帧率休眠
    pub pace_frames: bool,

    /// headless 后端运行的最大帧数，达到后 WindowShouldClose 返回 true；0 表示不限
    pub max_frames: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_handles: 65536,
            global_name: "rl".to_string(),
            storage_file: PathBuf::from("storage.data"),
            allow_open_url: false,
            call_log_limit: 4096,
            pace_frames: false,
            max_frames: 0,
        }
    }
}

impl HostConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_handles == 0 {
            return Err(ConfigError::ValidationError("max_handles must be positive".to_string()));
        }
        if self.max_handles > u32::MAX as usize {
            return Err(ConfigError::ValidationError("max_handles is too large".to_string()));
        }
        let valid_ident = self
            .global_name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && self
                .global_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid_ident {
            return Err(ConfigError::ValidationError(format!(
                "Invalid global name '{}'",
                self.global_name
            )));
        }
        Ok(())
    }
}
