//! 机器人状态定义

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// 相扑机器人状态
///
/// 互斥、唯一权威实例，仅由控制线程的 tick 写入。
///
/// # 状态说明
///
/// - **Idle**: 待机，电机停止（初始状态）
/// - **Countdown**: 开赛倒计时（蜂鸣器提示，电机不动）
/// - **Searching**: 旋转扫描寻找对手
/// - **Attacking**: 已定位对手，差速冲撞
/// - **Driving**: 直行（`Strategy::Brick`）
/// - **Turning**: 边线逃逸动作进行中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RobotState {
    #[default]
    Idle = 0,
    Driving = 1,
    Turning = 2,
    Searching = 3,
    Attacking = 4,
    Countdown = 5,
}

impl RobotState {
    /// 是否处于比赛运行中（非 Idle）
    pub fn is_running(self) -> bool {
        self != Self::Idle
    }

    /// 是否允许边线逃逸抢占
    ///
    /// Idle 与 Countdown 时机器人静止，Turning 时逃逸已在进行。
    pub fn accepts_escape(self) -> bool {
        matches!(self, Self::Driving | Self::Searching | Self::Attacking)
    }

    /// 状态名称（小写，用于状态输出）
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Driving => "driving",
            Self::Turning => "turning",
            Self::Searching => "searching",
            Self::Attacking => "attacking",
            Self::Countdown => "countdown",
        }
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
