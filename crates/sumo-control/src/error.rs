//! 控制层错误类型定义

use sumo_protocol::RobotState;
use thiserror::Error;

/// 控制层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// 状态与内部数据不一致（不可达分支）
    ///
    /// 状态机在返回此错误前已经停车并强制回到 `Idle`。
    #[error("Inconsistent state {state}: {reason}")]
    InconsistentState {
        state: RobotState,
        reason: &'static str,
    },
}
