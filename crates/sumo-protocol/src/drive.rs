//! 驱动指令定义

/// 电机驱动模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveMode {
    /// 电机停止
    #[default]
    Stopped,
    /// 速度闭环控制
    SpeedControlled,
}

/// 驱动指令：左右轮带符号速度 + 模式
///
/// 开环语义：状态机只写不读，指令下发后归执行器所有。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveCommand {
    pub left: i32,
    pub right: i32,
    pub mode: DriveMode,
}

impl DriveCommand {
    /// 速度控制指令
    pub const fn speed(left: i32, right: i32) -> Self {
        Self {
            left,
            right,
            mode: DriveMode::SpeedControlled,
        }
    }

    /// 停止指令
    pub const fn stopped() -> Self {
        Self {
            left: 0,
            right: 0,
            mode: DriveMode::Stopped,
        }
    }

    /// 直行（两轮同速）
    pub const fn forward(speed: i32) -> Self {
        Self::speed(speed, speed)
    }

    /// 倒车（两轮同速反转）
    pub const fn reverse(speed: i32) -> Self {
        Self::speed(-speed, -speed)
    }
}

/// 指示灯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lamp {
    /// 左侧压线
    LineLeft,
    /// 右侧压线
    LineRight,
    /// 左侧发现对手
    OpponentLeft,
    /// 右侧发现对手
    OpponentRight,
}

impl Lamp {
    pub const ALL: [Lamp; 4] = [
        Lamp::LineLeft,
        Lamp::LineRight,
        Lamp::OpponentLeft,
        Lamp::OpponentRight,
    ];

    /// 在 `ALL` 中的下标
    pub const fn index(self) -> usize {
        match self {
            Lamp::LineLeft => 0,
            Lamp::LineRight => 1,
            Lamp::OpponentLeft => 2,
            Lamp::OpponentRight => 3,
        }
    }
}
