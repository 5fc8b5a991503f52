//! 文本命令
//!
//! 控制台与遥控链路共用的命令集合。支持可选的 `sumo` 前缀，以及遥控菜单拼出的
//! 组合形式 `sumo start left line`（先应用扫描偏向与边线开关，再请求启动）。

use std::fmt;
use std::str::FromStr;
use sumo_protocol::{ParseError, SweepDirection};

/// 帮助文本
pub const HELP_TEXT: &str = "\
sumo                  ; Group of sumo commands
  help|status         ; Print help or status information
  start [bias] [line] ; Start the robot (optional: left|right|center, line|noline)
  stop                ; Stop the robot
  toggle              ; Start when idle, stop when running
  line|noline         ; Enable or disable line handling
  left|right|center   ; Set the initial search sweep direction";

/// 相扑命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumoCommand {
    /// 启动（可附带扫描偏向与边线开关）
    Start {
        bias: Option<SweepDirection>,
        line_handling: Option<bool>,
    },
    Stop,
    Toggle,
    Status,
    Help,
    /// 边线处理开关
    LineHandling(bool),
    /// 扫描起始方向
    SearchBias(SweepDirection),
}

impl SumoCommand {
    /// 不带参数的启动命令
    pub const fn start() -> Self {
        Self::Start {
            bias: None,
            line_handling: None,
        }
    }
}

fn reject_extra(command: &str, rest: &[&str]) -> Result<(), ParseError> {
    match rest.first() {
        None => Ok(()),
        Some(arg) => Err(ParseError::UnknownArgument {
            command: command.to_string(),
            argument: arg.to_string(),
        }),
    }
}

impl FromStr for SumoCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut tokens: Vec<&str> = lowered.split_whitespace().collect();

        if tokens.first() == Some(&"sumo") {
            tokens.remove(0);
            if tokens.is_empty() {
                return Ok(Self::Help);
            }
        }

        let Some((&command, rest)) = tokens.split_first() else {
            return Err(ParseError::Empty);
        };

        let simple = match command {
            "stop" => Some(Self::Stop),
            "toggle" => Some(Self::Toggle),
            "status" => Some(Self::Status),
            "help" => Some(Self::Help),
            "line" => Some(Self::LineHandling(true)),
            "noline" => Some(Self::LineHandling(false)),
            "left" | "right" | "center" => Some(Self::SearchBias(command.parse()?)),
            _ => None,
        };
        if let Some(parsed) = simple {
            reject_extra(command, rest)?;
            return Ok(parsed);
        }

        if command != "start" {
            return Err(ParseError::UnknownCommand(command.to_string()));
        }

        let mut bias = None;
        let mut line_handling = None;
        for &arg in rest {
            match arg {
                "left" | "right" | "center" => bias = Some(arg.parse()?),
                "line" => line_handling = Some(true),
                "noline" => line_handling = Some(false),
                _ => {
                    return Err(ParseError::UnknownArgument {
                        command: command.to_string(),
                        argument: arg.to_string(),
                    });
                },
            }
        }
        Ok(Self::Start {
            bias,
            line_handling,
        })
    }
}

impl fmt::Display for SumoCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start {
                bias,
                line_handling,
            } => {
                f.write_str("start")?;
                if let Some(bias) = bias {
                    write!(f, " {}", bias)?;
                }
                match line_handling {
                    Some(true) => f.write_str(" line"),
                    Some(false) => f.write_str(" noline"),
                    None => Ok(()),
                }
            },
            Self::Stop => f.write_str("stop"),
            Self::Toggle => f.write_str("toggle"),
            Self::Status => f.write_str("status"),
            Self::Help => f.write_str("help"),
            Self::LineHandling(true) => f.write_str("line"),
            Self::LineHandling(false) => f.write_str("noline"),
            Self::SearchBias(bias) => write!(f, "{}", bias),
        }
    }
}
