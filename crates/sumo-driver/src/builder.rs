//! Builder 模式实现
//!
//! 提供链式构造 `SumoRobot` 实例的便捷方式。

use crate::config::SumoConfig;
use crate::error::DriverError;
use crate::robot::SumoRobot;
use std::time::Duration;
use sumo_hal::{ActuatorAdapter, SensorAdapter};
use sumo_protocol::{Strategy, SweepDirection};

/// Sumo Builder（链式构造）
///
/// # Example
///
/// ```rust,ignore
/// use sumo_driver::SumoBuilder;
///
/// let robot = SumoBuilder::new()
///     .strategy(Strategy::Attack)
///     .countdown_beeps(3)
///     .build::<_, _, 6>(sensors, actuators)?;
/// robot.request_start();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SumoBuilder {
    config: SumoConfig,
}

impl SumoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用完整配置（覆盖之前的链式设置）
    pub fn config(mut self, config: SumoConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置 tick 周期（毫秒精度）
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.config.control.tick_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.control.strategy = strategy;
        self
    }

    /// 初始边线处理开关
    pub fn line_handling(mut self, enabled: bool) -> Self {
        self.config.line.enabled = enabled;
        self
    }

    /// 初始扫描方向
    pub fn search_bias(mut self, bias: SweepDirection) -> Self {
        self.config.search.bias = bias;
        self
    }

    /// 开赛倒计时蜂鸣次数（0 为不倒计时）
    pub fn countdown_beeps(mut self, beeps: u8) -> Self {
        self.config.countdown.beeps = beeps;
        self
    }

    /// 当前配置
    pub fn current_config(&self) -> &SumoConfig {
        &self.config
    }

    /// 校验配置并启动控制线程
    ///
    /// `N` 为边线传感器数量。
    pub fn build<S, A, const N: usize>(self, sensors: S, actuators: A) -> Result<SumoRobot, DriverError>
    where
        S: SensorAdapter<N> + Send + 'static,
        A: ActuatorAdapter + Send + 'static,
    {
        SumoRobot::spawn::<S, A, N>(sensors, actuators, &self.config)
    }
}
