//! 模拟输入
//!
//! `sim …` 命令直接修改 Mock 硬件的读数，控制线程在下一个 tick 看到变化。

use std::fmt::Write;
use std::str::FromStr;
use std::time::Duration;
use sumo_sdk::hal::mock::MockHardware;
use sumo_sdk::protocol::{Lamp, distance_from_raw};
use thiserror::Error;

/// 注入对手时默认的测距读数
const DEFAULT_DISTANCE: u16 = 200;

/// 一次最多打印的执行器调用条数
const MAX_CALLS_SHOWN: usize = 12;

pub const SIM_HELP: &str = "\
sim                             ; Simulated hardware
  line left|right|both|clear    ; Put the robot on (or off) the ring boundary
  opponent left|right|center|none [raw] ; Place the opponent (negative raw = no detection)
  delay <ms>                    ; Blocking duration of the pivot turn
  calls                         ; Show and clear recorded actuator calls
  lamps                         ; Show indicator lamps";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("missing sim target (try 'help')")]
    MissingTarget,

    #[error("unknown sim target '{0}'")]
    UnknownTarget(String),

    #[error("invalid {target} argument '{value}'")]
    InvalidArgument { target: &'static str, value: String },
}

/// 模拟命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCommand {
    Line { left: bool, right: bool },
    Opponent { left: Option<u16>, right: Option<u16> },
    TurnDelay(Duration),
    Calls,
    Lamps,
}

fn invalid(target: &'static str, value: Option<&&str>) -> SimError {
    SimError::InvalidArgument {
        target,
        value: value.map(|v| v.to_string()).unwrap_or_default(),
    }
}

impl FromStr for SimCommand {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
        if tokens.first() == Some(&"sim") {
            tokens.remove(0);
        }

        let Some((&target, args)) = tokens.split_first() else {
            return Err(SimError::MissingTarget);
        };

        match target {
            "line" => {
                let (left, right) = match args {
                    ["left"] => (true, false),
                    ["right"] => (false, true),
                    ["both"] => (true, true),
                    ["clear"] => (false, false),
                    _ => return Err(invalid("line", args.first())),
                };
                Ok(Self::Line { left, right })
            },
            "opponent" => {
                // 原始读数：负数为传感器的"无检测"哨兵
                let raw: i32 = match args.get(1) {
                    Some(raw) => raw.parse().map_err(|_| invalid("opponent", Some(raw)))?,
                    None => i32::from(DEFAULT_DISTANCE),
                };
                let distance = distance_from_raw(raw);
                if args.len() > 2 {
                    return Err(invalid("opponent", args.get(2)));
                }
                let (left, right) = match args.first() {
                    Some(&"left") => (distance, None),
                    Some(&"right") => (None, distance),
                    Some(&"center") => (distance, distance),
                    Some(&"none") if args.len() == 1 => (None, None),
                    other => return Err(invalid("opponent", other)),
                };
                Ok(Self::Opponent { left, right })
            },
            "delay" => match args {
                [ms] => ms
                    .parse()
                    .map(|ms| Self::TurnDelay(Duration::from_millis(ms)))
                    .map_err(|_| invalid("delay", Some(ms))),
                _ => Err(invalid("delay", args.first())),
            },
            "calls" if args.is_empty() => Ok(Self::Calls),
            "lamps" if args.is_empty() => Ok(Self::Lamps),
            "calls" | "lamps" => Err(invalid("sim", args.first())),
            other => Err(SimError::UnknownTarget(other.to_string())),
        }
    }
}

impl SimCommand {
    /// 作用到 Mock 硬件，返回应答文本
    pub fn apply<const N: usize>(&self, hw: &MockHardware<N>) -> String {
        match *self {
            Self::Line { left, right } => {
                hw.set_boundary(left, right);
                format!("sim: line left={} right={}", left, right)
            },
            Self::Opponent { left, right } => {
                hw.set_distances(left, right);
                format!("sim: opponent left={:?} right={:?}", left, right)
            },
            Self::TurnDelay(delay) => {
                hw.set_turn_delay(delay);
                format!("sim: turn delay {:?}", delay)
            },
            Self::Calls => {
                let calls = hw.take_calls();
                let mut out = format!("sim: {} actuator calls", calls.len());
                let skipped = calls.len().saturating_sub(MAX_CALLS_SHOWN);
                if skipped > 0 {
                    let _ = write!(out, " ({} older omitted)", skipped);
                }
                for call in &calls[skipped..] {
                    let _ = write!(out, "\n  {:?}", call);
                }
                out
            },
            Self::Lamps => {
                let mut out = String::from("sim: lamps");
                for lamp in Lamp::ALL {
                    let state = if hw.lamp(lamp) { "on" } else { "off" };
                    let _ = write!(out, "\n  {:?}: {}", lamp, state);
                }
                out
            },
        }
    }
}
