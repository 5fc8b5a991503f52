//! 集成测试公共设施
//!
//! 用 Mock 硬件 + 合成时间戳驱动状态机，不依赖真实时钟节拍。

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};
use sumo_sdk::control::{MachineParams, SharedSettings, SignalMailbox, SumoMachine};
use sumo_sdk::hal::mock::{ActuatorCall, MockActuators, MockHardware, MockSensors};
use sumo_sdk::protocol::{PendingSignals, RobotState};

pub const SENSORS: usize = 6;
pub const TICK: Duration = Duration::from_millis(10);

pub type MockMachine = SumoMachine<MockSensors<SENSORS>, MockActuators<SENSORS>, SENSORS>;

/// 测试台：状态机 + Mock 硬件 + 合成时钟
pub struct Bench {
    pub hw: MockHardware<SENSORS>,
    pub mailbox: Arc<SignalMailbox>,
    pub settings: Arc<SharedSettings>,
    pub machine: MockMachine,
    pub now: Instant,
    /// 每个 tick 结束后的状态
    pub trace: Vec<RobotState>,
}

impl Bench {
    pub fn new(params: MachineParams) -> Self {
        let hw = MockHardware::new();
        let mailbox = Arc::new(SignalMailbox::new());
        let settings = Arc::new(SharedSettings::default());
        let machine = MockMachine::new(
            hw.sensors(),
            hw.actuators(),
            mailbox.clone(),
            settings.clone(),
            params,
        );
        Self {
            hw,
            mailbox,
            settings,
            machine,
            now: Instant::now(),
            trace: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(MachineParams::default())
    }

    /// 推进一个 tick
    pub fn tick(&mut self) -> RobotState {
        self.now += TICK;
        let state = self
            .machine
            .tick(self.now)
            .expect("state machine reported an inconsistent state");
        self.trace.push(state);
        state
    }

    /// 连续推进 `n` 个 tick，返回最后的状态
    pub fn run(&mut self, n: usize) -> RobotState {
        let mut state = self.machine.state();
        for _ in 0..n {
            state = self.tick();
        }
        state
    }

    /// 推进直到离开 `state`，返回所用 tick 数
    pub fn ticks_until_left(&mut self, state: RobotState) -> Option<usize> {
        (1..=1000).find(|_| self.tick() != state)
    }

    pub fn start(&self) {
        self.mailbox.post(PendingSignals::START_REQUESTED);
    }

    pub fn stop(&self) {
        self.mailbox.post(PendingSignals::STOP_REQUESTED);
    }

    /// 去掉 `SetSpeed` 之外调用的速度序列
    pub fn speeds(&self) -> Vec<(i32, i32)> {
        self.hw
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                ActuatorCall::SetSpeed { left, right } => Some((left, right)),
                _ => None,
            })
            .collect()
    }
}
