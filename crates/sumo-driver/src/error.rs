//! 驱动层错误类型定义

use std::path::PathBuf;
use sumo_protocol::ParseError;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML 序列化失败
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 字段取值非法
    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 配置无效
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// 控制线程创建失败
    #[error("Failed to spawn {name} thread: {source}")]
    ThreadSpawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// 控制线程已退出
    #[error("Control thread is not running")]
    NotRunning,

    /// 命令解析失败
    #[error("Command error: {0}")]
    Parse(#[from] ParseError),

    /// 操作超时
    #[error("Operation timeout")]
    Timeout,
}
