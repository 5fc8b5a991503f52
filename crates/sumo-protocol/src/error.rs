//! 协议层错误类型定义

use thiserror::Error;

/// 文本解析错误
///
/// 用于命令词、扫描方向、策略名等字符串到枚举的转换。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 空输入
    #[error("Empty input")]
    Empty,

    /// 未知命令
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// 未知参数
    #[error("Unknown argument '{argument}' for '{command}'")]
    UnknownArgument { command: String, argument: String },

    /// 无效的枚举值
    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}
