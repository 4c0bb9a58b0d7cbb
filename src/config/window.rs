use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 窗口配置
///
/// headless 后端用它模拟窗口与显示器；真实后端只读取默认标题和尺寸。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// 脚本未指定时的窗口标题
    pub default_title: String,

    /// 默认宽度（像素）
    pub default_width: i32,

    /// 默认高度（像素）
    pub default_height: i32,

    /// 模拟的显示器列表
    #[serde(default = "default_monitors")]
    pub monitors: Vec<MonitorConfig>,
}

impl_default!(WindowConfig {
    default_title: "rayscript".to_string(),
    default_width: 800,
    default_height: 450,
    monitors: default_monitors(),
});

impl WindowConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_width <= 0 || self.default_height <= 0 {
            return Err(ConfigError::ValidationError(
                "Invalid default window size".to_string(),
            ));
        }
        for monitor in &self.monitors {
            monitor.validate()?;
        }
        Ok(())
    }
}

/// 显示器描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub name: String,
    /// 分辨率（像素）
    pub width: i32,
    pub height: i32,
    /// 物理尺寸（毫米）
    pub physical_width: i32,
    pub physical_height: i32,
}

impl_default!(MonitorConfig {
    name: "Headless Display".to_string(),
    width: 1920,
    height: 1080,
    physical_width: 527,
    physical_height: 296,
});

impl MonitorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "Invalid resolution for monitor '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

fn default_monitors() -> Vec<MonitorConfig> {
    vec![MonitorConfig::default()]
}
