//! # Sumo Control
//!
//! 相扑机器人决策层，按组件划分：
//!
//! - [`line_guard`]：边线分类与逃逸机动
//! - [`search`]：对手定位与旋转扫描
//! - [`attack`]：差速冲撞
//! - [`machine`]：每个 tick 调度以上组件的状态机
//!
//! 状态机由控制线程独占（单写者）；与外部线程共享的只有 [`SignalMailbox`]
//! （原子位域）和 [`SharedSettings`]（原子开关）。

pub mod attack;
mod error;
pub mod line_guard;
pub mod machine;
pub mod search;
pub mod settings;
pub mod signal;

pub use attack::{AttackParams, attack};
pub use error::ControlError;
pub use line_guard::{EscapeManeuver, EscapeParams, EscapeProgress, check_line, classify_line};
pub use machine::{CountdownParams, MachineParams, MachineSnapshot, SumoMachine};
pub use search::{SearchSweep, locate_opponent, scan_opponent, sweep_command};
pub use settings::SharedSettings;
pub use signal::SignalMailbox;
