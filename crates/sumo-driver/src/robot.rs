//! Robot API 模块
//!
//! [`SumoRobot`] 拥有控制线程；[`SumoHandle`] 是可克隆的命令入口，
//! 可以交给控制台、遥控链路等任意线程。

use crate::command::{HELP_TEXT, SumoCommand};
use crate::config::SumoConfig;
use crate::error::DriverError;
use crate::metrics::MetricsSnapshot;
use crate::pipeline::{LoopConfig, control_loop};
use crate::state::{SumoContext, SumoStatus};
use crate::thread::JoinTimeout;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use sumo_control::{SharedSettings, SumoMachine};
use sumo_hal::{ActuatorAdapter, SensorAdapter};
use sumo_protocol::{PendingSignals, RobotState, SweepDirection};
use tracing::{debug, error, info};

/// 控制线程名
const CONTROL_THREAD: &str = "sumo-control";

/// Drop 时等待控制线程退出的上限
const JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// 命令入口（可克隆，线程安全）
#[derive(Debug, Clone)]
pub struct SumoHandle {
    ctx: Arc<SumoContext>,
}

impl SumoHandle {
    fn post(&self, signals: PendingSignals) {
        if self.ctx.mailbox.post(signals) {
            self.ctx
                .metrics
                .coalesced_signals
                .fetch_add(1, Ordering::Relaxed);
            debug!("Signal {:?} coalesced with a pending one", signals);
        }
    }

    /// 请求启动（下一个 tick 生效）
    pub fn request_start(&self) {
        self.ctx.metrics.start_requests.fetch_add(1, Ordering::Relaxed);
        self.post(PendingSignals::START_REQUESTED);
    }

    /// 请求停止（下一个 tick 生效）
    pub fn request_stop(&self) {
        self.ctx.metrics.stop_requests.fetch_add(1, Ordering::Relaxed);
        self.post(PendingSignals::STOP_REQUESTED);
    }

    /// 运行中则请求停止，否则请求启动
    ///
    /// # 返回
    ///
    /// 请求的是启动时返回 `true`。
    pub fn request_toggle(&self) -> bool {
        if self.status().is_running() {
            self.request_stop();
            false
        } else {
            self.request_start();
            true
        }
    }

    pub fn set_line_handling(&self, enabled: bool) {
        info!("Line handling {}", if enabled { "enabled" } else { "disabled" });
        self.ctx.settings.set_line_handling(enabled);
    }

    pub fn line_handling(&self) -> bool {
        self.ctx.settings.line_handling()
    }

    /// 设置扫描起始方向（下次进入 `Searching` 时生效）
    pub fn set_search_bias(&self, bias: SweepDirection) {
        info!("Search bias set to {}", bias);
        self.ctx.settings.set_search_bias(bias);
    }

    pub fn search_bias(&self) -> SweepDirection {
        self.ctx.settings.search_bias()
    }

    /// 最新发布的状态
    pub fn status(&self) -> SumoStatus {
        self.ctx.status()
    }

    pub fn state(&self) -> RobotState {
        self.ctx.status().state
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.ctx.metrics.snapshot()
    }

    /// 尚未被控制线程读取的信号
    pub fn pending_signals(&self) -> PendingSignals {
        self.ctx.mailbox.peek()
    }

    /// 控制线程是否仍在运行
    pub fn is_alive(&self) -> bool {
        self.ctx.is_control_alive()
    }

    /// 等待进入指定状态
    ///
    /// # 返回
    ///
    /// - `Err(DriverError::NotRunning)`: 控制线程已退出且未处于该状态
    /// - `Err(DriverError::Timeout)`: 超时
    pub fn wait_for_state(&self, state: RobotState, timeout: Duration) -> Result<(), DriverError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.state() == state {
                return Ok(());
            }
            if !self.is_alive() {
                return Err(DriverError::NotRunning);
            }
            if Instant::now() >= deadline {
                return Err(DriverError::Timeout);
            }
            spin_sleep::sleep(Duration::from_millis(1));
        }
    }

    /// 执行文本命令，返回应答文本
    pub fn execute(&self, command: &SumoCommand) -> String {
        match *command {
            SumoCommand::Start {
                bias,
                line_handling,
            } => {
                if let Some(bias) = bias {
                    self.set_search_bias(bias);
                }
                if let Some(enabled) = line_handling {
                    self.set_line_handling(enabled);
                }
                self.request_start();
                "sumo: start requested".to_string()
            },
            SumoCommand::Stop => {
                self.request_stop();
                "sumo: stop requested".to_string()
            },
            SumoCommand::Toggle => {
                if self.request_toggle() {
                    "sumo: start requested".to_string()
                } else {
                    "sumo: stop requested".to_string()
                }
            },
            SumoCommand::Status => self.status().to_string(),
            SumoCommand::Help => HELP_TEXT.to_string(),
            SumoCommand::LineHandling(enabled) => {
                self.set_line_handling(enabled);
                format!("line handling: {}", if enabled { "on" } else { "off" })
            },
            SumoCommand::SearchBias(bias) => {
                self.set_search_bias(bias);
                format!("search bias: {}", bias)
            },
        }
    }

    /// 解析并执行一行文本命令
    pub fn execute_line(&self, line: &str) -> Result<String, DriverError> {
        let command: SumoCommand = line.parse()?;
        Ok(self.execute(&command))
    }
}

/// 相扑机器人（拥有控制线程）
///
/// Drop 时通知控制线程退出并等待（最多 2 秒），控制线程退出前停车。
pub struct SumoRobot {
    handle: SumoHandle,
    is_running: Arc<AtomicBool>,
    control_thread: Option<JoinHandle<()>>,
}

impl SumoRobot {
    /// 启动控制线程
    ///
    /// 配置先经过校验；控制线程创建失败时返回 `DriverError::ThreadSpawn`，不会留下半启动的实例。
    pub(crate) fn spawn<S, A, const N: usize>(
        sensors: S,
        actuators: A,
        config: &SumoConfig,
    ) -> Result<Self, DriverError>
    where
        S: SensorAdapter<N> + Send + 'static,
        A: ActuatorAdapter + Send + 'static,
    {
        config.validate()?;

        let ctx = Arc::new(SumoContext::new(SharedSettings::new(
            config.line.enabled,
            config.search.bias,
        )));
        let machine: SumoMachine<S, A, N> = SumoMachine::new(
            sensors,
            actuators,
            ctx.mailbox.clone(),
            ctx.settings.clone(),
            config.to_machine_params(),
        );

        let is_running = Arc::new(AtomicBool::new(true));
        let loop_config = LoopConfig {
            tick_period: config.tick_period(),
        };

        let ctx_thread = ctx.clone();
        let is_running_thread = is_running.clone();
        let control_thread = std::thread::Builder::new()
            .name(CONTROL_THREAD.to_string())
            .spawn(move || control_loop(machine, ctx_thread, is_running_thread, loop_config))
            .map_err(|source| DriverError::ThreadSpawn {
                name: CONTROL_THREAD,
                source,
            })?;

        info!(
            "Sumo robot started (strategy: {}, {} line sensors)",
            config.control.strategy, N
        );

        Ok(Self {
            handle: SumoHandle { ctx },
            is_running,
            control_thread: Some(control_thread),
        })
    }

    /// 可克隆的命令入口
    pub fn handle(&self) -> SumoHandle {
        self.handle.clone()
    }

    /// 控制线程是否仍在运行
    pub fn is_running(&self) -> bool {
        self.control_thread
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// 停止控制线程并等待退出
    pub fn shutdown(mut self) -> Result<(), DriverError> {
        self.stop_control_thread()
    }

    fn stop_control_thread(&mut self) -> Result<(), DriverError> {
        self.is_running.store(false, Ordering::Release);

        let Some(handle) = self.control_thread.take() else {
            return Ok(());
        };

        handle.join_timeout(JOIN_TIMEOUT).map_err(|_| {
            error!(
                "Control thread panicked or failed to shut down within {:?}",
                JOIN_TIMEOUT
            );
            DriverError::Timeout
        })
    }
}

impl Deref for SumoRobot {
    type Target = SumoHandle;

    fn deref(&self) -> &SumoHandle {
        &self.handle
    }
}

impl Drop for SumoRobot {
    fn drop(&mut self) {
        let _ = self.stop_control_thread();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo_hal::mock::MockHardware;

    fn spawn_mock(config: &SumoConfig) -> (MockHardware<6>, SumoRobot) {
        let hw = MockHardware::<6>::new();
        let robot = SumoRobot::spawn::<_, _, 6>(hw.sensors(), hw.actuators(), config).unwrap();
        (hw, robot)
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SumoConfig::default();
        config.attack.turn_bias = 2.0;
        let hw = MockHardware::<6>::new();
        let result = SumoRobot::spawn::<_, _, 6>(hw.sensors(), hw.actuators(), &config);
        assert!(matches!(result, Err(DriverError::Config(_))));
    }

    #[test]
    fn test_start_stop_roundtrip() {
        let (_hw, robot) = spawn_mock(&SumoConfig::default());
        assert!(robot.is_running());

        robot.request_start();
        robot
            .wait_for_state(RobotState::Searching, Duration::from_secs(2))
            .unwrap();
        assert!(robot.status().is_running());

        robot.request_stop();
        robot
            .wait_for_state(RobotState::Idle, Duration::from_secs(2))
            .unwrap();

        let metrics = robot.metrics();
        assert_eq!(metrics.start_requests, 1);
        assert_eq!(metrics.stop_requests, 1);
    }

    #[test]
    fn test_toggle() {
        let (_hw, robot) = spawn_mock(&SumoConfig::default());
        assert!(robot.request_toggle());
        robot
            .wait_for_state(RobotState::Searching, Duration::from_secs(2))
            .unwrap();
        assert!(!robot.request_toggle());
        robot
            .wait_for_state(RobotState::Idle, Duration::from_secs(2))
            .unwrap();
    }

    #[test]
    fn test_execute_settings_commands() {
        let (_hw, robot) = spawn_mock(&SumoConfig::default());
        assert_eq!(robot.execute_line("noline").unwrap(), "line handling: off");
        assert!(!robot.line_handling());
        assert_eq!(robot.execute_line("sumo right").unwrap(), "search bias: right");
        assert_eq!(robot.search_bias(), SweepDirection::Right);
        assert!(robot.execute_line("status").unwrap().starts_with("running: no"));
        assert!(matches!(
            robot.execute_line("dance"),
            Err(DriverError::Parse(_))
        ));
    }

    #[test]
    fn test_shutdown_stops_motors() {
        let (hw, robot) = spawn_mock(&SumoConfig::default());
        robot.request_start();
        robot
            .wait_for_state(RobotState::Searching, Duration::from_secs(2))
            .unwrap();
        robot.shutdown().unwrap();
        assert_eq!(hw.last_mode(), Some(sumo_protocol::DriveMode::Stopped));
    }

    #[test]
    fn test_handle_outlives_control_thread() {
        let (_hw, robot) = spawn_mock(&SumoConfig::default());
        let handle = robot.handle();
        robot.shutdown().unwrap();

        assert!(!handle.is_alive());
        assert!(handle.wait_for_state(RobotState::Idle, Duration::ZERO).is_ok());
        assert!(matches!(
            handle.wait_for_state(RobotState::Searching, Duration::from_secs(1)),
            Err(DriverError::NotRunning)
        ));
    }

    /// 读边线即 panic 的传感器
    struct FaultySensors;

    impl SensorAdapter<6> for FaultySensors {
        fn read_line_sensors(&mut self) -> [u16; 6] {
            panic!("line sensor bus fault");
        }

        fn read_distance(&mut self, _side: sumo_protocol::Side) -> Option<u16> {
            None
        }
    }

    #[test]
    fn test_panicking_adapter_marks_control_thread_dead() {
        let hw = MockHardware::<6>::new();
        let robot =
            SumoRobot::spawn::<_, _, 6>(FaultySensors, hw.actuators(), &SumoConfig::default())
                .unwrap();
        let handle = robot.handle();

        // 边线守卫在第一个 tick 即读取传感器
        let deadline = Instant::now() + Duration::from_secs(2);
        while handle.is_alive() {
            assert!(Instant::now() < deadline, "control thread still reported alive");
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(matches!(
            handle.wait_for_state(RobotState::Attacking, Duration::from_secs(1)),
            Err(DriverError::NotRunning)
        ));
        assert!(robot.shutdown().is_err());
    }
}
