//! 对手搜索
//!
//! 未发现对手时原地旋转扫描：每个窗口（默认 1 秒，按 tick 计数）朝一个方向，
//! 窗口结束后按 `Left → Right → Forward → Left …` 轮转，`Forward` 为全速前探。

use sumo_hal::{ActuatorAdapter, SensorAdapter};
use sumo_protocol::{DriveCommand, Lamp, OpponentPosition, Side, SweepDirection};
use tracing::debug;

/// 对手定位（纯函数，全域定义）
pub fn locate_opponent(left: Option<u16>, right: Option<u16>) -> OpponentPosition {
    match (left, right) {
        (Some(_), Some(_)) => OpponentPosition::Center,
        (Some(_), None) => OpponentPosition::Left,
        (None, Some(_)) => OpponentPosition::Right,
        (None, None) => OpponentPosition::Lost,
    }
}

/// 读取测距、定位并同步对手指示灯
pub fn scan_opponent<const N: usize, S, A>(sensors: &mut S, actuators: &mut A) -> OpponentPosition
where
    S: SensorAdapter<N>,
    A: ActuatorAdapter,
{
    let left = sensors.read_distance(Side::Left);
    let right = sensors.read_distance(Side::Right);
    actuators.set_lamp(Lamp::OpponentLeft, left.is_some());
    actuators.set_lamp(Lamp::OpponentRight, right.is_some());
    locate_opponent(left, right)
}

/// 扫描方向对应的驱动指令
///
/// - `Left`: 原地左转 `(-spin, spin)`
/// - `Right`: 原地右转 `(spin, -spin)`
/// - `Forward`: 直线前探 `(probe, probe)`
pub fn sweep_command(direction: SweepDirection, spin_speed: i32, probe_speed: i32) -> DriveCommand {
    match direction {
        SweepDirection::Left => DriveCommand::speed(-spin_speed, spin_speed),
        SweepDirection::Right => DriveCommand::speed(spin_speed, -spin_speed),
        SweepDirection::Forward => DriveCommand::forward(probe_speed),
    }
}

/// 扫描状态（跨 tick 保留）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSweep {
    direction: SweepDirection,
    ticks_in_window: u32,
    window_ticks: u32,
}

impl SearchSweep {
    /// # 参数
    ///
    /// - `window_ticks`: 每个方向持续的 tick 数（至少 1）
    /// - `start`: 起始方向
    pub fn new(window_ticks: u32, start: SweepDirection) -> Self {
        Self {
            direction: start,
            ticks_in_window: 0,
            window_ticks: window_ticks.max(1),
        }
    }

    /// 重置扫描阶段
    pub fn reset(&mut self, start: SweepDirection) {
        self.direction = start;
        self.ticks_in_window = 0;
    }

    /// 推进一个 tick
    ///
    /// # 返回
    ///
    /// 本 tick 应执行的方向。窗口用尽时，下一次调用返回轮转后的方向。
    pub fn sweep(&mut self) -> SweepDirection {
        let current = self.direction;
        self.ticks_in_window += 1;
        if self.ticks_in_window >= self.window_ticks {
            self.ticks_in_window = 0;
            self.direction = current.next();
            debug!("Sweep window elapsed: {} -> {}", current, self.direction);
        }
        current
    }

    /// 下一次 `sweep()` 的方向
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    pub fn window_ticks(&self) -> u32 {
        self.window_ticks
    }
}
