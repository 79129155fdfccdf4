//! 应用配置持久化
//!
//! 配置文件为 ~/.tick/config.toml，目前只记录主题选择。
//! 加载是宽容的：文件缺失或解析失败一律退回默认值。

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use super::tick_dir;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 获取配置文件路径
fn config_path() -> PathBuf {
    tick_dir().join("config.toml")
}

/// 加载配置（不存在或损坏则返回默认值）
pub fn load_config() -> Config {
    let path = config_path();
    if !path.exists() {
        return Config::default();
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .unwrap_or_default()
}

/// 保存配置
pub fn save_config(config: &Config) -> io::Result<()> {
    // 确保 ~/.tick 目录存在
    let dir = tick_dir();
    fs::create_dir_all(&dir)?;

    let path = config_path();
    let content = toml::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_config_round_trip() {
        let config = Config {
            theme: ThemeConfig {
                name: "Dracula".to_string(),
            },
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.theme.name, "Dracula");
    }

    #[test]
    fn test_empty_file_defaults_to_auto() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.theme.name, "Auto");
    }
}
