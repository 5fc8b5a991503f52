//! 差速冲撞
//!
//! 对手在哪一侧，哪一侧的对轮就更快：`Left` 时右轮为 `max/K`、左轮为 `max*K`，
//! 车头偏向左侧。`Right` 对称。

use sumo_protocol::{DriveCommand, OpponentPosition};

/// 冲撞参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackParams {
    /// 直行速度
    pub max_speed: i32,
    /// 转向偏置系数 `K`（`0 < K < 1`）
    pub turn_bias: f64,
}

impl Default for AttackParams {
    fn default() -> Self {
        Self {
            max_speed: 2500,
            turn_bias: 0.8,
        }
    }
}

impl AttackParams {
    /// 慢侧速度 `max*K`
    pub fn slow_speed(&self) -> i32 {
        (self.max_speed as f64 * self.turn_bias).round() as i32
    }

    /// 快侧速度 `max/K`
    pub fn fast_speed(&self) -> i32 {
        (self.max_speed as f64 / self.turn_bias).round() as i32
    }
}

/// 位置 → 驱动指令
///
/// `Lost` 返回 `None`，调用方应回到搜索。
pub fn attack(position: OpponentPosition, params: &AttackParams) -> Option<DriveCommand> {
    match position {
        OpponentPosition::Center => Some(DriveCommand::forward(params.max_speed)),
        OpponentPosition::Left => Some(DriveCommand::speed(params.slow_speed(), params.fast_speed())),
        OpponentPosition::Right => Some(DriveCommand::speed(params.fast_speed(), params.slow_speed())),
        OpponentPosition::Lost => None,
    }
}
