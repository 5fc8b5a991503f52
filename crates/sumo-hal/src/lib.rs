//! # Sumo HAL
//!
//! 硬件抽象层：传感器与执行器的统一接口。
//!
//! 控制线程独占两个适配器（单写者），因此接口使用 `&mut self`，无需内部加锁。
//! 传感器读取不建模失败：驱动层总是返回最近一次有效值，"无检测"用 `None` 表达。
//!
//! 启用 `mock` feature 可获得无硬件依赖的 [`mock::MockHardware`]，用于测试与仿真。

use std::time::Duration;

pub use sumo_protocol::{DriveMode, Lamp, Side};

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "mock")]
pub use mock::{ActuatorCall, MockActuators, MockHardware, MockSensors};

/// 传感器适配器
///
/// `N` 为边线传感器数量（编译期固定）。
pub trait SensorAdapter<const N: usize> {
    /// 读取边线传感器阵列（从左到右）
    ///
    /// 数值越低表示反射越弱（白色边线反射强时数值低，取决于传感器极性，
    /// 阈值比较统一为"低于阈值即压线"）。
    fn read_line_sensors(&mut self) -> [u16; N];

    /// 读取指定侧的测距值
    ///
    /// # 返回
    ///
    /// - `Some(distance)`: 有效距离
    /// - `None`: 无检测（哨兵值）
    fn read_distance(&mut self, side: Side) -> Option<u16>;
}

/// 执行器适配器
pub trait ActuatorAdapter {
    /// 设置左右轮目标速度（带符号）
    fn set_speed(&mut self, left: i32, right: i32);

    /// 设置电机驱动模式
    fn set_mode(&mut self, mode: DriveMode);

    /// 原地转向指定角度（阻塞直到完成）
    ///
    /// 正值向右，负值向左。
    fn turn_by_angle(&mut self, degrees: i16);

    /// 蜂鸣
    fn beep(&mut self, frequency_hz: u16, duration: Duration);

    /// 指示灯开关（默认无指示灯）
    fn set_lamp(&mut self, _lamp: Lamp, _on: bool) {}
}

impl<const N: usize, T: SensorAdapter<N> + ?Sized> SensorAdapter<N> for Box<T> {
    fn read_line_sensors(&mut self) -> [u16; N] {
        (**self).read_line_sensors()
    }

    fn read_distance(&mut self, side: Side) -> Option<u16> {
        (**self).read_distance(side)
    }
}

impl<T: ActuatorAdapter + ?Sized> ActuatorAdapter for Box<T> {
    fn set_speed(&mut self, left: i32, right: i32) {
        (**self).set_speed(left, right)
    }

    fn set_mode(&mut self, mode: DriveMode) {
        (**self).set_mode(mode)
    }

    fn turn_by_angle(&mut self, degrees: i16) {
        (**self).turn_by_angle(degrees)
    }

    fn beep(&mut self, frequency_hz: u16, duration: Duration) {
        (**self).beep(frequency_hz, duration)
    }

    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        (**self).set_lamp(lamp, on)
    }
}
