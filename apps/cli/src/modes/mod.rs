//! 运行模式
//!
//! 目前只有 REPL 模式：控制线程在后台运行，Shell 下发命令。

pub mod repl;
