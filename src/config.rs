use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// 运行配置 (config.toml)，缺省字段使用默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 状态记录使用的存储键
    pub storage_key: String,
    pub notification_ttl_ms: u64,
    pub pulse_ms: u64,
    pub min_password_len: usize,
    /// 事件轮询间隔
    pub tick_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "blogAppData".to_string(),
            notification_ttl_ms: 3000,
            pulse_ms: 300,
            min_password_len: 6,
            tick_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 从TOML文件加载配置，文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "min_password_len = 8\npulse_ms = 500\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.min_password_len, 8);
        assert_eq!(config.pulse(), Duration::from_millis(500));
        assert_eq!(config.storage_key, "blogAppData");
        assert_eq!(config.notification_ttl_ms, 3000);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "min_password_len = \"six\"").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
