//! Mock 硬件后端
//!
//! 传感器与执行器共享同一份内部状态：测试线程通过 [`MockHardware`] 注入读数、
//! 检查执行器调用记录，控制线程持有 [`MockSensors`] / [`MockActuators`]。

use crate::{ActuatorAdapter, SensorAdapter};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use sumo_protocol::{DriveMode, Lamp, Side};
use tracing::trace;

/// 边线读数：压线
pub const MOCK_LINE: u16 = 100;
/// 边线读数：场地内
pub const MOCK_FLOOR: u16 = 900;

/// 执行器调用记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetSpeed { left: i32, right: i32 },
    SetMode(DriveMode),
    Turn(i16),
    Beep { frequency_hz: u16, duration: Duration },
}

#[derive(Debug)]
struct MockState<const N: usize> {
    line: [u16; N],
    left_distance: Option<u16>,
    right_distance: Option<u16>,
    calls: Vec<ActuatorCall>,
    lamps: [bool; 4],
    turn_delay: Duration,
    line_reads: u64,
}

/// Mock 硬件（测试侧句柄）
#[derive(Debug, Clone)]
pub struct MockHardware<const N: usize> {
    state: Arc<Mutex<MockState<N>>>,
}

impl<const N: usize> Default for MockHardware<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MockHardware<N> {
    /// 创建 Mock 硬件：场地内、无对手、无调用记录
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                line: [MOCK_FLOOR; N],
                left_distance: None,
                right_distance: None,
                calls: Vec::new(),
                lamps: [false; 4],
                turn_delay: Duration::ZERO,
                line_reads: 0,
            })),
        }
    }

    /// 传感器端（交给控制线程）
    pub fn sensors(&self) -> MockSensors<N> {
        MockSensors {
            state: self.state.clone(),
        }
    }

    /// 执行器端（交给控制线程）
    pub fn actuators(&self) -> MockActuators<N> {
        MockActuators {
            state: self.state.clone(),
        }
    }

    /// 直接设置边线原始读数
    pub fn set_line_readings(&self, readings: [u16; N]) {
        self.state.lock().line = readings;
    }

    /// 按左右边界设置边线读数（最左/最右传感器）
    pub fn set_boundary(&self, left: bool, right: bool) {
        let mut state = self.state.lock();
        state.line = [MOCK_FLOOR; N];
        if N == 0 {
            return;
        }
        if left {
            state.line[0] = MOCK_LINE;
        }
        if right {
            state.line[N - 1] = MOCK_LINE;
        }
    }

    /// 设置左右测距值（`None` 表示无检测）
    pub fn set_distances(&self, left: Option<u16>, right: Option<u16>) {
        let mut state = self.state.lock();
        state.left_distance = left;
        state.right_distance = right;
    }

    /// 设置 `turn_by_angle` 的模拟耗时
    pub fn set_turn_delay(&self, delay: Duration) {
        self.state.lock().turn_delay = delay;
    }

    /// 执行器调用记录（拷贝）
    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.state.lock().calls.clone()
    }

    /// 取出并清空执行器调用记录
    pub fn take_calls(&self) -> Vec<ActuatorCall> {
        std::mem::take(&mut self.state.lock().calls)
    }

    /// 最近一次 `set_speed` 的参数
    pub fn last_speed(&self) -> Option<(i32, i32)> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            ActuatorCall::SetSpeed { left, right } => Some((*left, *right)),
            _ => None,
        })
    }

    /// 最近一次 `set_mode` 的参数
    pub fn last_mode(&self) -> Option<DriveMode> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            ActuatorCall::SetMode(mode) => Some(*mode),
            _ => None,
        })
    }

    /// 指示灯状态
    pub fn lamp(&self, lamp: Lamp) -> bool {
        self.state.lock().lamps[lamp.index()]
    }

    /// 边线传感器被读取的次数
    pub fn line_reads(&self) -> u64 {
        self.state.lock().line_reads
    }
}

/// Mock 传感器端
#[derive(Debug)]
pub struct MockSensors<const N: usize> {
    state: Arc<Mutex<MockState<N>>>,
}

impl<const N: usize> SensorAdapter<N> for MockSensors<N> {
    fn read_line_sensors(&mut self) -> [u16; N] {
        let mut state = self.state.lock();
        state.line_reads += 1;
        state.line
    }

    fn read_distance(&mut self, side: Side) -> Option<u16> {
        let state = self.state.lock();
        match side {
            Side::Left => state.left_distance,
            Side::Right => state.right_distance,
        }
    }
}

/// Mock 执行器端
#[derive(Debug)]
pub struct MockActuators<const N: usize> {
    state: Arc<Mutex<MockState<N>>>,
}

impl<const N: usize> MockActuators<N> {
    fn record(&self, call: ActuatorCall) {
        trace!("mock actuator: {:?}", call);
        self.state.lock().calls.push(call);
    }
}

impl<const N: usize> ActuatorAdapter for MockActuators<N> {
    fn set_speed(&mut self, left: i32, right: i32) {
        self.record(ActuatorCall::SetSpeed { left, right });
    }

    fn set_mode(&mut self, mode: DriveMode) {
        self.record(ActuatorCall::SetMode(mode));
    }

    fn turn_by_angle(&mut self, degrees: i16) {
        self.record(ActuatorCall::Turn(degrees));
        // 锁外等待，避免阻塞测试线程注入读数
        let delay = self.state.lock().turn_delay;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    fn beep(&mut self, frequency_hz: u16, duration: Duration) {
        self.record(ActuatorCall::Beep {
            frequency_hz,
            duration,
        });
    }

    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        self.state.lock().lamps[lamp.index()] = on;
    }
}
