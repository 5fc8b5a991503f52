//! 边线守卫
//!
//! 只看阵列最左与最右两路传感器：它们最先越过场地边缘，中间传感器不参与逃逸判断。
//!
//! 逃逸机动分三步：倒车 → 停车 → 原地转向（远离边线）。倒车阶段是带截止时间的
//! 定时等待（由状态机逐 tick 轮询），转向本身是执行器的阻塞调用。

use std::time::{Duration, Instant};
use sumo_hal::{ActuatorAdapter, SensorAdapter};
use sumo_protocol::{DriveMode, Lamp, LineClass, TurnDirection};
use tracing::debug;

/// 边线分类（纯函数）
///
/// # 参数
///
/// - `readings`: 边线传感器读数（从左到右）
/// - `threshold`: 低于此值视为压线
///
/// 空阵列视为未压线。
pub fn classify_line(readings: &[u16], threshold: u16) -> LineClass {
    match (readings.first(), readings.last()) {
        (Some(&first), Some(&last)) => LineClass {
            left: first < threshold,
            right: last < threshold,
        },
        _ => LineClass::NONE,
    }
}

/// 读取传感器、分类并点亮对应指示灯
pub fn check_line<const N: usize, S, A>(sensors: &mut S, actuators: &mut A, threshold: u16) -> LineClass
where
    S: SensorAdapter<N>,
    A: ActuatorAdapter,
{
    let readings = sensors.read_line_sensors();
    let line = classify_line(&readings, threshold);
    actuators.set_lamp(Lamp::LineLeft, line.left);
    actuators.set_lamp(Lamp::LineRight, line.right);
    line
}

/// 逃逸参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeParams {
    /// 倒车速度（取正值，下发时取反）
    pub speed: i32,
    /// 倒车时长
    pub reverse: Duration,
    /// 转向角度（度，取正值，方向由边线侧决定）
    pub turn_angle_deg: i16,
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            speed: 2500,
            reverse: Duration::from_millis(200),
            turn_angle_deg: 130,
        }
    }
}

/// 逃逸轮询结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeProgress {
    /// 仍在倒车
    Reversing,
    /// 已停车并完成转向
    Completed,
}

/// 进行中的逃逸机动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeManeuver {
    turn: TurnDirection,
    angle: i16,
    until: Instant,
}

impl EscapeManeuver {
    /// 开始逃逸：两轮同速倒车
    pub fn begin<A: ActuatorAdapter>(
        actuators: &mut A,
        turn: TurnDirection,
        params: &EscapeParams,
        now: Instant,
    ) -> Self {
        let speed = params.speed.saturating_abs();
        debug!(
            "Escape: reversing at {} for {:?}, then turning {:?}",
            speed, params.reverse, turn
        );
        actuators.set_speed(-speed, -speed);
        actuators.set_mode(DriveMode::SpeedControlled);

        Self {
            turn,
            angle: turn.signed_angle(params.turn_angle_deg),
            until: now + params.reverse,
        }
    }

    /// 轮询倒车截止时间
    ///
    /// 截止时间到达后停车并执行阻塞转向。
    pub fn poll<A: ActuatorAdapter>(&self, actuators: &mut A, now: Instant) -> EscapeProgress {
        if now < self.until {
            return EscapeProgress::Reversing;
        }

        actuators.set_mode(DriveMode::Stopped);
        debug!("Escape: pivot {} deg", self.angle);
        actuators.turn_by_angle(self.angle);
        EscapeProgress::Completed
    }

    pub fn turn(&self) -> TurnDirection {
        self.turn
    }

    /// 带符号转向角度
    pub fn angle(&self) -> i16 {
        self.angle
    }

    /// 倒车截止时间
    pub fn deadline(&self) -> Instant {
        self.until
    }
}
