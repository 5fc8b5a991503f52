//! # Sumo Protocol
//!
//! 相扑机器人控制器的纯数据类型层（无 IO、无线程）。
//!
//! 包含：
//! - 机器人状态（`RobotState`）
//! - 异步信号位域（`PendingSignals`）
//! - 边线分类（`LineClass`）与对手位置分类（`OpponentPosition`）
//! - 驱动指令（`DriveCommand`）
//! - 搜索扫描方向与策略（`SweepDirection`、`Strategy`）

pub mod drive;
pub mod error;
pub mod line;
pub mod opponent;
pub mod search;
pub mod signal;
pub mod state;

pub use drive::{DriveCommand, DriveMode, Lamp};
pub use error::ParseError;
pub use line::{LineClass, LineEdge, TurnDirection};
pub use opponent::{OpponentPosition, Side, distance_from_raw};
pub use search::{Strategy, SweepDirection};
pub use signal::PendingSignals;
pub use state::RobotState;

/// 默认边线传感器数量（反射阵列 6 路）
pub const DEFAULT_LINE_SENSOR_COUNT: usize = 6;
