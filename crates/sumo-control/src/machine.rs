//! 相扑状态机
//!
//! 控制线程每个 tick 调用一次 [`SumoMachine::tick`]，顺序固定：
//!
//! 1. 边线守卫（`Turning` 期间跳过）：活动状态下发现边线立即开始逃逸，本 tick 结束
//! 2. 一次性读取并清除信号邮箱（零超时）
//! 3. `STOP_REQUESTED`：停车并进入 `Idle`
//! 4. 按当前状态推进一步（单 tick 内不跨多个状态，`Idle → Searching` 除外）
//!
//! 倒车与倒计时都是带截止时间的定时等待，期间 tick 照常运行，停止请求在下一个
//! tick 生效。
//!
//! # 示例
//!
//! ```rust,ignore
//! let mut machine = SumoMachine::<_, _, 6>::new(sensors, actuators, mailbox, settings, params);
//! loop {
//!     let state = machine.tick(Instant::now())?;
//!     spin_sleep::sleep(Duration::from_millis(10));
//! }
//! ```

use crate::attack::{AttackParams, attack};
use crate::error::ControlError;
use crate::line_guard::{EscapeManeuver, EscapeParams, EscapeProgress, check_line};
use crate::search::{SearchSweep, scan_opponent, sweep_command};
use crate::settings::SharedSettings;
use crate::signal::SignalMailbox;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sumo_hal::{ActuatorAdapter, SensorAdapter};
use sumo_protocol::{
    DriveCommand, DriveMode, LineClass, OpponentPosition, PendingSignals, RobotState, Strategy,
    SweepDirection, TurnDirection,
};
use tracing::{debug, error, info, trace};

/// 开赛倒计时参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownParams {
    /// 蜂鸣次数（0 表示不倒计时，收到 start 直接进入 `Searching`）
    pub beeps: u8,
    /// 两次蜂鸣的间隔（最后一次蜂鸣后同样等待一个间隔）
    pub interval: Duration,
    pub frequency_hz: u16,
    pub beep_duration: Duration,
}

impl Default for CountdownParams {
    fn default() -> Self {
        Self {
            beeps: 0,
            interval: Duration::from_secs(1),
            frequency_hz: 880,
            beep_duration: Duration::from_millis(100),
        }
    }
}

/// 状态机参数
#[derive(Debug, Clone, PartialEq)]
pub struct MachineParams {
    /// 边线阈值
    pub line_threshold: u16,
    pub escape: EscapeParams,
    /// 扫描窗口（tick 数）
    pub sweep_window_ticks: u32,
    /// 原地扫描速度
    pub spin_speed: i32,
    /// 前探速度
    pub probe_speed: i32,
    pub attack: AttackParams,
    pub countdown: CountdownParams,
    pub strategy: Strategy,
    /// `Brick` 策略的直行速度
    pub cruise_speed: i32,
}

impl Default for MachineParams {
    fn default() -> Self {
        Self {
            line_threshold: 500,
            escape: EscapeParams::default(),
            sweep_window_ticks: 100,
            spin_speed: 1500,
            probe_speed: 2500,
            attack: AttackParams::default(),
            countdown: CountdownParams::default(),
            strategy: Strategy::Attack,
            cruise_speed: 2500,
        }
    }
}

/// 状态机快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub state: RobotState,
    pub strategy: Strategy,
    /// 最近一次边线分类
    pub line: LineClass,
    /// 最近一次对手定位
    pub opponent: OpponentPosition,
    /// 下一个扫描方向
    pub sweep: SweepDirection,
    /// 已执行的 tick 数
    pub ticks: u64,
    /// 已完成的逃逸次数
    pub escapes: u64,
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    remaining: u8,
    next_beep: Instant,
}

/// 相扑状态机（控制线程独占）
pub struct SumoMachine<S, A, const N: usize> {
    sensors: S,
    actuators: A,
    mailbox: Arc<SignalMailbox>,
    settings: Arc<SharedSettings>,
    params: MachineParams,
    state: RobotState,
    escape: Option<EscapeManeuver>,
    countdown: Option<Countdown>,
    sweep: SearchSweep,
    /// 最近一次下发的是停车指令（用于 stop 幂等）
    motors_stopped: bool,
    last_line: LineClass,
    last_opponent: OpponentPosition,
    ticks: u64,
    escapes: u64,
}

impl<S, A, const N: usize> SumoMachine<S, A, N>
where
    S: SensorAdapter<N>,
    A: ActuatorAdapter,
{
    pub fn new(
        sensors: S,
        actuators: A,
        mailbox: Arc<SignalMailbox>,
        settings: Arc<SharedSettings>,
        params: MachineParams,
    ) -> Self {
        let sweep = SearchSweep::new(params.sweep_window_ticks, settings.search_bias());
        Self {
            sensors,
            actuators,
            mailbox,
            settings,
            params,
            state: RobotState::Idle,
            escape: None,
            countdown: None,
            sweep,
            motors_stopped: false,
            last_line: LineClass::NONE,
            last_opponent: OpponentPosition::Lost,
            ticks: 0,
            escapes: 0,
        }
    }

    /// 执行一个控制周期
    ///
    /// # 参数
    ///
    /// - `now`: 本 tick 的时间戳（定时等待的截止时间以此比较）
    ///
    /// # 返回
    ///
    /// - `Ok(state)`: tick 结束后的状态
    /// - `Err(ControlError::InconsistentState)`: 检测到不可达状态，已停车并回到 `Idle`
    pub fn tick(&mut self, now: Instant) -> Result<RobotState, ControlError> {
        self.ticks += 1;
        let previous = self.state;

        if self.state != RobotState::Turning && self.settings.line_handling() {
            let line = check_line::<N, S, A>(
                &mut self.sensors,
                &mut self.actuators,
                self.params.line_threshold,
            );
            self.last_line = line;

            if self.state.accepts_escape()
                && let Some(turn) = line.escape_turn()
            {
                self.mailbox.post(PendingSignals::line_alarm(line));
                self.begin_escape(turn, now);
                self.log_transition(previous);
                return Ok(self.state);
            }
        }

        let signals = self.mailbox.take_all();
        if !signals.is_empty() {
            trace!("tick {}: signals {:?}", self.ticks, signals);
        }

        if signals.contains(PendingSignals::STOP_REQUESTED) {
            self.enter_idle();
            self.log_transition(previous);
            return Ok(self.state);
        }

        // 外部投递的边线告警与守卫检测到的边线同等处理；边线处理关闭时丢弃
        if self.settings.line_handling()
            && self.state.accepts_escape()
            && let Some(turn) = signals.escape_turn()
        {
            self.begin_escape(turn, now);
            self.log_transition(previous);
            return Ok(self.state);
        }

        let step = match self.state {
            RobotState::Idle => {
                if signals.contains(PendingSignals::START_REQUESTED) {
                    self.start(now);
                }
                Ok(())
            },
            RobotState::Countdown => self.step_countdown(now),
            RobotState::Turning => self.step_escape(now),
            RobotState::Searching => {
                self.step_search();
                Ok(())
            },
            RobotState::Attacking => self.step_attack(),
            RobotState::Driving => self.step_drive(),
        };

        if let Err(err) = step {
            error!("{}; forcing idle", err);
            self.force_idle();
            return Err(err);
        }

        self.log_transition(previous);
        Ok(self.state)
    }

    /// 停车并回到 `Idle`（控制线程退出时调用）
    pub fn shutdown(&mut self) {
        self.escape = None;
        self.countdown = None;
        self.actuators.set_mode(DriveMode::Stopped);
        self.motors_stopped = true;
        if self.state != RobotState::Idle {
            info!("Sumo: {} -> idle (shutdown)", self.state);
        }
        self.state = RobotState::Idle;
    }

    pub fn state(&self) -> RobotState {
        self.state
    }

    pub fn params(&self) -> &MachineParams {
        &self.params
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            state: self.state,
            strategy: self.params.strategy,
            line: self.last_line,
            opponent: self.last_opponent,
            sweep: self.sweep.direction(),
            ticks: self.ticks,
            escapes: self.escapes,
        }
    }

    fn start(&mut self, now: Instant) {
        let countdown = self.params.countdown;
        if countdown.beeps > 0 {
            self.countdown = Some(Countdown {
                remaining: countdown.beeps,
                next_beep: now,
            });
            self.state = RobotState::Countdown;
        } else {
            self.enter_searching();
        }
    }

    fn step_countdown(&mut self, now: Instant) -> Result<(), ControlError> {
        let Some(mut countdown) = self.countdown else {
            return Err(self.inconsistent("no countdown in progress"));
        };

        if now < countdown.next_beep {
            return Ok(());
        }

        if countdown.remaining == 0 {
            self.countdown = None;
            self.enter_searching();
            return Ok(());
        }

        let params = self.params.countdown;
        self.actuators.beep(params.frequency_hz, params.beep_duration);
        countdown.remaining -= 1;
        countdown.next_beep = now + params.interval;
        debug!("Countdown: {} beeps left", countdown.remaining);
        self.countdown = Some(countdown);
        Ok(())
    }

    fn begin_escape(&mut self, turn: TurnDirection, now: Instant) {
        self.countdown = None;
        self.escape = Some(EscapeManeuver::begin(
            &mut self.actuators,
            turn,
            &self.params.escape,
            now,
        ));
        self.motors_stopped = false;
        self.state = RobotState::Turning;
    }

    fn step_escape(&mut self, now: Instant) -> Result<(), ControlError> {
        let Some(escape) = self.escape else {
            return Err(self.inconsistent("no escape maneuver in progress"));
        };

        match escape.poll(&mut self.actuators, now) {
            EscapeProgress::Reversing => Ok(()),
            EscapeProgress::Completed => {
                self.escape = None;
                self.escapes += 1;
                // 机动期间积累的边线与启动信号作废，停止请求保留
                self.mailbox
                    .clear(PendingSignals::LINE_MASK | PendingSignals::START_REQUESTED);
                self.enter_searching();
                Ok(())
            },
        }
    }

    fn step_search(&mut self) {
        match self.params.strategy {
            Strategy::Brick => {
                self.drive(DriveCommand::forward(self.params.cruise_speed));
                self.state = RobotState::Driving;
            },
            Strategy::Attack => {
                let position = scan_opponent::<N, S, A>(&mut self.sensors, &mut self.actuators);
                self.last_opponent = position;

                if position.is_located() {
                    self.actuators.set_mode(DriveMode::SpeedControlled);
                    self.motors_stopped = false;
                    self.state = RobotState::Attacking;
                } else {
                    let direction = self.sweep.sweep();
                    self.drive(sweep_command(
                        direction,
                        self.params.spin_speed,
                        self.params.probe_speed,
                    ));
                }
            },
        }
    }

    fn step_attack(&mut self) -> Result<(), ControlError> {
        if self.params.strategy != Strategy::Attack {
            return Err(self.inconsistent("attacking outside the attack strategy"));
        }

        let position = scan_opponent::<N, S, A>(&mut self.sensors, &mut self.actuators);
        self.last_opponent = position;

        match attack(position, &self.params.attack) {
            Some(command) => self.drive(command),
            None => {
                debug!("Opponent lost, back to searching");
                self.enter_searching();
            },
        }
        Ok(())
    }

    fn step_drive(&mut self) -> Result<(), ControlError> {
        if self.params.strategy != Strategy::Brick {
            return Err(self.inconsistent("driving outside the brick strategy"));
        }
        Ok(())
    }

    fn enter_searching(&mut self) {
        self.actuators.set_mode(DriveMode::SpeedControlled);
        self.motors_stopped = false;
        self.sweep.reset(self.settings.search_bias());
        self.state = RobotState::Searching;
    }

    /// 停车并进入 `Idle`
    ///
    /// 已处于停车状态时不再下发指令。
    fn enter_idle(&mut self) {
        self.escape = None;
        self.countdown = None;
        if !self.motors_stopped {
            self.actuators.set_mode(DriveMode::Stopped);
            self.motors_stopped = true;
        }
        self.state = RobotState::Idle;
    }

    fn force_idle(&mut self) {
        self.escape = None;
        self.countdown = None;
        self.actuators.set_mode(DriveMode::Stopped);
        self.motors_stopped = true;
        self.state = RobotState::Idle;
    }

    fn drive(&mut self, command: DriveCommand) {
        self.actuators.set_speed(command.left, command.right);
        if command.mode == DriveMode::Stopped {
            self.actuators.set_mode(DriveMode::Stopped);
            self.motors_stopped = true;
        } else {
            self.motors_stopped = false;
        }
    }

    fn inconsistent(&self, reason: &'static str) -> ControlError {
        ControlError::InconsistentState {
            state: self.state,
            reason,
        }
    }

    fn log_transition(&self, previous: RobotState) {
        if previous != self.state {
            info!("Sumo: {} -> {}", previous, self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo_hal::mock::{ActuatorCall, MockActuators, MockHardware, MockSensors};

    type Machine = SumoMachine<MockSensors<6>, MockActuators<6>, 6>;

    const TICK: Duration = Duration::from_millis(10);

    struct Rig {
        hw: MockHardware<6>,
        mailbox: Arc<SignalMailbox>,
        settings: Arc<SharedSettings>,
        machine: Machine,
        now: Instant,
    }

    impl Rig {
        fn new(params: MachineParams) -> Self {
            let hw = MockHardware::<6>::new();
            let mailbox = Arc::new(SignalMailbox::new());
            let settings = Arc::new(SharedSettings::default());
            let machine = SumoMachine::new(
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
            }
        }

        fn tick(&mut self) -> RobotState {
            self.now += TICK;
            self.machine.tick(self.now).unwrap()
        }

        fn post(&self, signals: PendingSignals) {
            self.mailbox.post(signals);
        }
    }

    fn small_params() -> MachineParams {
        MachineParams {
            sweep_window_ticks: 3,
            ..MachineParams::default()
        }
    }

    #[test]
    fn test_idle_without_signals_stays_idle() {
        let mut rig = Rig::new(small_params());
        assert_eq!(rig.tick(), RobotState::Idle);
        assert_eq!(rig.tick(), RobotState::Idle);
        assert!(rig.hw.calls().is_empty());
    }

    #[test]
    fn test_start_enters_searching() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(rig.hw.last_mode(), Some(DriveMode::SpeedControlled));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::STOP_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Idle);
        let first = rig.hw.take_calls();
        assert_eq!(first, vec![ActuatorCall::SetMode(DriveMode::Stopped)]);

        for _ in 0..5 {
            rig.post(PendingSignals::STOP_REQUESTED);
            assert_eq!(rig.tick(), RobotState::Idle);
        }
        assert!(rig.hw.calls().is_empty());
    }

    #[test]
    fn test_stop_wins_over_start_in_same_tick() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED | PendingSignals::STOP_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Idle);
    }

    #[test]
    fn test_sweep_then_attack() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Searching);

        // 窗口 3 tick：左转 3 次后轮转到右转
        for _ in 0..3 {
            assert_eq!(rig.tick(), RobotState::Searching);
            assert_eq!(rig.hw.last_speed(), Some((-1500, 1500)));
        }
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(rig.hw.last_speed(), Some((1500, -1500)));

        rig.hw.set_distances(Some(200), Some(210));
        assert_eq!(rig.tick(), RobotState::Attacking);
        assert_eq!(rig.hw.last_mode(), Some(DriveMode::SpeedControlled));

        assert_eq!(rig.tick(), RobotState::Attacking);
        assert_eq!(rig.hw.last_speed(), Some((2500, 2500)));
    }

    #[test]
    fn test_attack_lost_returns_to_search_with_bias() {
        let mut rig = Rig::new(small_params());
        rig.settings.set_search_bias(SweepDirection::Right);
        rig.post(PendingSignals::START_REQUESTED);
        rig.hw.set_distances(Some(200), None);
        rig.tick();
        assert_eq!(rig.tick(), RobotState::Attacking);
        assert_eq!(rig.tick(), RobotState::Attacking);
        assert_eq!(rig.hw.last_speed(), Some((2000, 3125)));

        rig.hw.set_distances(None, None);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(rig.machine.snapshot().sweep, SweepDirection::Right);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(rig.hw.last_speed(), Some((1500, -1500)));
    }

    #[test]
    fn test_boundary_runs_escape_and_resumes_searching() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED);
        rig.tick();
        rig.hw.take_calls();

        rig.hw.set_boundary(true, false);
        assert_eq!(rig.tick(), RobotState::Turning);
        assert!(rig.mailbox.peek().contains(PendingSignals::LINE_ALARM | PendingSignals::LINE_LEFT));

        // 倒车中：不再读取边线
        rig.hw.set_boundary(false, false);
        let reads = rig.hw.line_reads();
        for _ in 0..19 {
            assert_eq!(rig.tick(), RobotState::Turning);
        }
        assert_eq!(rig.hw.line_reads(), reads);

        // 200ms 到期：停车、转向、恢复
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(
            rig.hw.calls(),
            vec![
                ActuatorCall::SetSpeed { left: -2500, right: -2500 },
                ActuatorCall::SetMode(DriveMode::SpeedControlled),
                ActuatorCall::SetMode(DriveMode::Stopped),
                ActuatorCall::Turn(130),
                ActuatorCall::SetMode(DriveMode::SpeedControlled),
            ]
        );
        assert!(!rig.mailbox.peek().intersects(PendingSignals::LINE_MASK));
        assert_eq!(rig.machine.snapshot().escapes, 1);
    }

    #[test]
    fn test_both_boundaries_turn_left() {
        let mut rig = Rig::new(MachineParams {
            escape: EscapeParams {
                reverse: Duration::ZERO,
                ..EscapeParams::default()
            },
            ..small_params()
        });
        rig.post(PendingSignals::START_REQUESTED);
        rig.tick();
        rig.hw.set_boundary(true, true);
        assert_eq!(rig.tick(), RobotState::Turning);
        rig.hw.set_boundary(false, false);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert!(rig.hw.calls().contains(&ActuatorCall::Turn(-130)));
    }

    #[test]
    fn test_line_signals_during_escape_are_discarded() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED);
        rig.tick();
        rig.hw.set_boundary(false, true);
        assert_eq!(rig.tick(), RobotState::Turning);
        rig.hw.set_boundary(false, false);

        rig.post(PendingSignals::line_alarm(LineClass { left: true, right: false }));
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Turning);

        rig.now += Duration::from_millis(300);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert!(rig.mailbox.peek().is_empty());
        assert_eq!(rig.tick(), RobotState::Searching);
    }

    #[test]
    fn test_stop_during_reverse_is_honored() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED);
        rig.tick();
        rig.hw.set_boundary(true, false);
        assert_eq!(rig.tick(), RobotState::Turning);
        rig.hw.take_calls();

        rig.post(PendingSignals::STOP_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Idle);
        assert_eq!(rig.hw.calls(), vec![ActuatorCall::SetMode(DriveMode::Stopped)]);
    }

    #[test]
    fn test_line_handling_disabled() {
        let mut rig = Rig::new(small_params());
        rig.settings.set_line_handling(false);
        rig.post(PendingSignals::START_REQUESTED);
        rig.tick();
        rig.hw.set_boundary(true, true);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(rig.hw.line_reads(), 0);
    }

    #[test]
    fn test_external_alarm_ignored_when_line_handling_disabled() {
        let mut rig = Rig::new(small_params());
        rig.settings.set_line_handling(false);
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Searching);

        rig.post(PendingSignals::LINE_ALARM | PendingSignals::LINE_LEFT);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert!(rig.mailbox.peek().is_empty());
        assert_eq!(rig.machine.snapshot().escapes, 0);
    }

    #[test]
    fn test_idle_never_escapes() {
        let mut rig = Rig::new(small_params());
        rig.hw.set_boundary(true, false);
        assert_eq!(rig.tick(), RobotState::Idle);
        assert!(rig.hw.calls().is_empty());
        assert!(rig.machine.snapshot().line.left);
    }

    #[test]
    fn test_countdown_then_search() {
        let mut rig = Rig::new(MachineParams {
            countdown: CountdownParams {
                beeps: 2,
                interval: Duration::from_millis(50),
                ..CountdownParams::default()
            },
            ..small_params()
        });
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Countdown);
        assert_eq!(rig.tick(), RobotState::Countdown);

        let beeps = |rig: &Rig| {
            rig.hw
                .calls()
                .iter()
                .filter(|c| matches!(c, ActuatorCall::Beep { .. }))
                .count()
        };
        assert_eq!(beeps(&rig), 1);

        let mut ticks = 0;
        while rig.tick() == RobotState::Countdown {
            ticks += 1;
            assert!(ticks < 50);
        }
        assert_eq!(rig.machine.state(), RobotState::Searching);
        assert_eq!(beeps(&rig), 2);
    }

    #[test]
    fn test_stop_during_countdown() {
        let mut rig = Rig::new(MachineParams {
            countdown: CountdownParams {
                beeps: 3,
                ..CountdownParams::default()
            },
            ..small_params()
        });
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Countdown);
        rig.post(PendingSignals::STOP_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Idle);
    }

    #[test]
    fn test_brick_strategy_drives_and_resumes() {
        let mut rig = Rig::new(MachineParams {
            strategy: Strategy::Brick,
            escape: EscapeParams {
                reverse: Duration::ZERO,
                ..EscapeParams::default()
            },
            ..small_params()
        });
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(rig.tick(), RobotState::Driving);
        assert_eq!(rig.hw.last_speed(), Some((2500, 2500)));
        assert_eq!(rig.tick(), RobotState::Driving);

        rig.hw.set_boundary(false, true);
        assert_eq!(rig.tick(), RobotState::Turning);
        rig.hw.set_boundary(false, false);
        assert_eq!(rig.tick(), RobotState::Searching);
        assert_eq!(rig.tick(), RobotState::Driving);
    }

    #[test]
    fn test_external_line_alarm_starts_escape() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED);
        rig.tick();
        rig.post(PendingSignals::LINE_ALARM | PendingSignals::LINE_LEFT);
        assert_eq!(rig.tick(), RobotState::Turning);
    }

    #[test]
    fn test_inconsistent_turning_forces_idle() {
        let mut rig = Rig::new(small_params());
        rig.machine.state = RobotState::Turning;
        rig.now += TICK;
        let err = rig.machine.tick(rig.now).unwrap_err();
        assert!(matches!(
            err,
            ControlError::InconsistentState {
                state: RobotState::Turning,
                ..
            }
        ));
        assert_eq!(rig.machine.state(), RobotState::Idle);
        assert_eq!(rig.hw.last_mode(), Some(DriveMode::Stopped));

        // 恢复后可正常启动
        rig.post(PendingSignals::START_REQUESTED);
        assert_eq!(rig.tick(), RobotState::Searching);
    }

    #[test]
    fn test_inconsistent_driving_under_attack() {
        let mut rig = Rig::new(small_params());
        rig.machine.state = RobotState::Driving;
        rig.now += TICK;
        assert!(rig.machine.tick(rig.now).is_err());
        assert_eq!(rig.machine.state(), RobotState::Idle);
    }

    #[test]
    fn test_shutdown_stops_motors() {
        let mut rig = Rig::new(small_params());
        rig.post(PendingSignals::START_REQUESTED);
        rig.tick();
        rig.machine.shutdown();
        assert_eq!(rig.machine.state(), RobotState::Idle);
        assert_eq!(rig.hw.last_mode(), Some(DriveMode::Stopped));
    }
}
