//! # Sumo Driver
//!
//! 相扑机器人运行时：
//! - 控制线程（固定周期调用状态机，`spin_sleep` 定时）
//! - 状态发布（`ArcSwap` 无锁读取）与原子指标
//! - 文本命令与遥控链路
//! - TOML 配置
//!
//! # 使用场景
//!
//! 大多数用户应该通过 `sumo-sdk` 使用本 crate。

mod builder;
pub mod command;
pub mod config;
mod error;
pub mod metrics;
pub mod pipeline;
pub mod remote;
mod robot;
pub mod state;
mod thread;

pub use builder::SumoBuilder;
pub use command::{HELP_TEXT, SumoCommand};
pub use config::SumoConfig;
pub use error::{ConfigError, DriverError};
pub use metrics::{MetricsSnapshot, SumoMetrics};
pub use pipeline::{LoopConfig, control_loop};
pub use remote::{RemoteLink, spawn_remote_link};
pub use robot::{SumoHandle, SumoRobot};
pub use state::{SumoContext, SumoStatus};
