//! 配置文件
//!
//! TOML 格式，所有字段都有默认值（缺省的节或字段使用默认值）：
//!
//! ```toml
//! [control]
//! tick_period_ms = 10
//! strategy = "attack"      # attack | brick
//! cruise_speed = 2500
//!
//! [line]
//! enabled = true
//! threshold = 500
//!
//! [escape]
//! speed = 2500
//! reverse_ms = 200
//! turn_angle_deg = 130
//!
//! [search]
//! window_ms = 1000
//! spin_speed = 1500
//! probe_speed = 2500
//! bias = "left"            # left | right | forward (center)
//!
//! [attack]
//! max_speed = 2500
//! turn_bias = 0.8
//!
//! [countdown]
//! beeps = 0
//! interval_ms = 1000
//! frequency_hz = 880
//! beep_ms = 100
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use sumo_control::{AttackParams, CountdownParams, EscapeParams, MachineParams};
use sumo_protocol::{Strategy, SweepDirection};

/// 控制周期与策略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSection {
    pub tick_period_ms: u64,
    pub strategy: Strategy,
    /// `brick` 策略的直行速度
    pub cruise_speed: i32,
}

impl Default for ControlSection {
    fn default() -> Self {
        Self {
            tick_period_ms: 10,
            strategy: Strategy::Attack,
            cruise_speed: 2500,
        }
    }
}

/// 边线守卫
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSection {
    pub enabled: bool,
    pub threshold: u16,
}

impl Default for LineSection {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 500,
        }
    }
}

/// 逃逸机动
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeSection {
    pub speed: i32,
    pub reverse_ms: u64,
    pub turn_angle_deg: i16,
}

impl Default for EscapeSection {
    fn default() -> Self {
        Self {
            speed: 2500,
            reverse_ms: 200,
            turn_angle_deg: 130,
        }
    }
}

/// 旋转扫描
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub window_ms: u64,
    pub spin_speed: i32,
    pub probe_speed: i32,
    pub bias: SweepDirection,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            window_ms: 1000,
            spin_speed: 1500,
            probe_speed: 2500,
            bias: SweepDirection::Left,
        }
    }
}

/// 差速冲撞
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackSection {
    pub max_speed: i32,
    pub turn_bias: f64,
}

impl Default for AttackSection {
    fn default() -> Self {
        Self {
            max_speed: 2500,
            turn_bias: 0.8,
        }
    }
}

/// 开赛倒计时
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSection {
    pub beeps: u8,
    pub interval_ms: u64,
    pub frequency_hz: u16,
    pub beep_ms: u64,
}

impl Default for CountdownSection {
    fn default() -> Self {
        Self {
            beeps: 0,
            interval_ms: 1000,
            frequency_hz: 880,
            beep_ms: 100,
        }
    }
}

/// 相扑控制器配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SumoConfig {
    pub control: ControlSection,
    pub line: LineSection,
    pub escape: EscapeSection,
    pub search: SearchSection,
    pub attack: AttackSection,
    pub countdown: CountdownSection,
}

impl SumoConfig {
    /// 解析并校验 TOML 文本
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 校验取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control.tick_period_ms == 0 {
            return Err(ConfigError::invalid("control.tick_period_ms", "must be greater than 0"));
        }
        if self.search.window_ms < self.control.tick_period_ms {
            return Err(ConfigError::invalid(
                "search.window_ms",
                format!(
                    "must be at least one tick ({} ms), got {}",
                    self.control.tick_period_ms, self.search.window_ms
                ),
            ));
        }

        let turn_bias = self.attack.turn_bias;
        if !(turn_bias.is_finite() && turn_bias > 0.0 && turn_bias < 1.0) {
            return Err(ConfigError::invalid(
                "attack.turn_bias",
                format!("must be in (0, 1), got {}", turn_bias),
            ));
        }

        let speeds = [
            ("control.cruise_speed", self.control.cruise_speed),
            ("escape.speed", self.escape.speed),
            ("search.spin_speed", self.search.spin_speed),
            ("search.probe_speed", self.search.probe_speed),
            ("attack.max_speed", self.attack.max_speed),
        ];
        for (field, speed) in speeds {
            if speed < 0 {
                return Err(ConfigError::invalid(field, format!("must be non-negative, got {}", speed)));
            }
        }

        let fast = self.attack.max_speed as f64 / turn_bias;
        if fast > i32::MAX as f64 {
            return Err(ConfigError::invalid(
                "attack.max_speed",
                format!("max_speed / turn_bias overflows ({})", fast),
            ));
        }

        if self.escape.turn_angle_deg == i16::MIN {
            return Err(ConfigError::invalid("escape.turn_angle_deg", "out of range"));
        }

        if self.countdown.beeps > 0 && self.countdown.interval_ms == 0 {
            return Err(ConfigError::invalid("countdown.interval_ms", "must be greater than 0"));
        }

        Ok(())
    }

    /// 控制周期
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.control.tick_period_ms)
    }

    /// 扫描窗口换算为 tick 数（向上取整，至少 1）
    pub fn sweep_window_ticks(&self) -> u32 {
        let tick = self.control.tick_period_ms.max(1);
        let ticks = self.search.window_ms.div_ceil(tick).max(1);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// 转换为状态机参数
    pub fn to_machine_params(&self) -> MachineParams {
        MachineParams {
            line_threshold: self.line.threshold,
            escape: EscapeParams {
                speed: self.escape.speed,
                reverse: Duration::from_millis(self.escape.reverse_ms),
                turn_angle_deg: self.escape.turn_angle_deg,
            },
            sweep_window_ticks: self.sweep_window_ticks(),
            spin_speed: self.search.spin_speed,
            probe_speed: self.search.probe_speed,
            attack: AttackParams {
                max_speed: self.attack.max_speed,
                turn_bias: self.attack.turn_bias,
            },
            countdown: CountdownParams {
                beeps: self.countdown.beeps,
                interval: Duration::from_millis(self.countdown.interval_ms),
                frequency_hz: self.countdown.frequency_hz,
                beep_duration: Duration::from_millis(self.countdown.beep_ms),
            },
            strategy: self.control.strategy,
            cruise_speed: self.control.cruise_speed,
        }
    }
}
