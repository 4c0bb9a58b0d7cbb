/// 统一配置系统
///
/// 提供TOML/JSON配置文件与环境变量覆盖
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod host;
pub mod window;

pub use host::HostConfig;
pub use window::{MonitorConfig, WindowConfig};

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 宿主配置
    #[serde(default)]
    pub host: HostConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 配置来源文件（不序列化）
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl BridgeConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(ConfigError::FileError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(ConfigError::FileError)?;
        let mut config = Self::from_json_str(&content)?;
        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 按扩展名选择解析器加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// 按扩展名保存：`.json` 为 JSON，其余为 TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("json") => self.save_json(path),
            _ => self.save_toml(path),
        }
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        // 宿主配置
        if let Ok(val) = env::var("RAYSCRIPT_MAX_HANDLES") {
            if let Ok(max) = val.parse() {
                self.host.max_handles = max;
            }
        }
        if let Ok(val) = env::var("RAYSCRIPT_STORAGE_FILE") {
            self.host.storage_file = PathBuf::from(val);
        }
        if let Ok(val) = env::var("RAYSCRIPT_ALLOW_OPEN_URL") {
            self.host.allow_open_url = val.parse().unwrap_or(self.host.allow_open_url);
        }
        if let Ok(val) = env::var("RAYSCRIPT_PACE_FRAMES") {
            self.host.pace_frames = val.parse().unwrap_or(self.host.pace_frames);
        }
        if let Ok(val) = env::var("RAYSCRIPT_MAX_FRAMES") {
            if let Ok(frames) = val.parse() {
                self.host.max_frames = frames;
            }
        }

        // 窗口配置
        if let Ok(val) = env::var("RAYSCRIPT_WINDOW_TITLE") {
            self.window.default_title = val;
        }

        // 日志配置
        if let Ok(val) = env::var("RAYSCRIPT_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&val) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.window.validate()?;
        self.host.validate()?;
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./rayscript.toml
    /// 2. ./rayscript.json
    /// 3. <用户配置目录>/rayscript/config.toml
    /// 4. 使用默认配置
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::from_toml_file("rayscript.toml") {
            return config;
        }

        if let Ok(config) = Self::from_json_file("rayscript.json") {
            return config;
        }

        if let Some(dir) = dirs::config_dir() {
            let config_path = dir.join("rayscript").join("config.toml");
            if let Ok(config) = Self::from_toml_file(&config_path) {
                return config;
            }
        }

        Self::default()
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 优先）
    pub level: LogLevel,

    /// 是否输出到文件
    pub log_to_file: bool,

    /// 日志文件路径
    pub log_file_path: String,

    /// 是否输出到控制台
    pub log_to_console: bool,
}

use crate::impl_default;

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_file: false,
    log_file_path: "rayscript.log".to_string(),
    log_to_console: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// 不区分大小写解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// EnvFilter 指令
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.host.global_name, "rl");
        assert_eq!(config.window.monitors.len(), 1);
    }

    #[test]
    fn test_toml_serialization() {
        let config = BridgeConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: BridgeConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.host.max_handles, parsed.host.max_handles);
        assert_eq!(config.window.monitors, parsed.window.monitors);
    }

    #[test]
    fn test_json_serialization() {
        let config = BridgeConfig::default();
        let json_str = serde_json::to_string(&config).unwrap();
        let parsed: BridgeConfig = serde_json::from_str(&json_str).unwrap();
        assert_eq!(config.window.default_width, parsed.window.default_width);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = BridgeConfig::from_toml_str(
            r#"
            [host]
            max_handles = 8
            global_name = "raylib"
            storage_file = "save.bin"
            allow_open_url = false
            call_log_limit = 0
            pace_frames = false
            "#,
        )
        .unwrap();
        assert_eq!(config.host.max_handles, 8);
        assert_eq!(config.host.global_name, "raylib");
        assert_eq!(config.window.default_width, 800);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = BridgeConfig::default();
        config.host.max_handles = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = BridgeConfig::default();
        config.host.global_name = "1rl".to_string();
        assert!(config.validate().is_err());

        let mut config = BridgeConfig::default();
        config.window.monitors[0].width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BridgeConfig::default();
        config.window.default_title = "demo".to_string();
        config.host.max_frames = 120;

        for name in ["rayscript.json", "rayscript.toml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            let loaded = BridgeConfig::from_file(&path).unwrap();
            assert_eq!(loaded.window.default_title, "demo");
            assert_eq!(loaded.host.max_frames, 120);
            assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        }

        let toml_path = dir.path().join("rayscript.toml");
        assert!(BridgeConfig::from_json_file(&toml_path).is_err());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("nope"), None);
    }
}
