//! 搜索扫描方向与比赛策略定义

use crate::error::ParseError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;
use std::str::FromStr;

/// 扫描方向（三态轮转）
///
/// 扫描窗口结束仍未发现对手时按 `Left → Right → Forward → Left …` 轮转。
/// `Forward` 为全速前探。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum SweepDirection {
    #[default]
    Left = 0,
    Right = 1,
    #[cfg_attr(feature = "serde", serde(alias = "center"))]
    Forward = 2,
}

impl SweepDirection {
    /// 三态轮转的下一个方向
    pub fn next(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Forward,
            Self::Forward => Self::Left,
        }
    }

    /// 命令词（`center` 对应前探）
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Forward => "center",
        }
    }
}

impl fmt::Display for SweepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" | "forward" => Ok(Self::Forward),
            other => Err(ParseError::InvalidValue {
                kind: "sweep direction",
                value: other.to_string(),
            }),
        }
    }
}

/// 比赛策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// 扫描寻敌 + 差速冲撞
    #[default]
    Attack,
    /// 直线推进，仅在边线处逃逸
    Brick,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => f.write_str("attack"),
            Self::Brick => f.write_str("brick"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" => Ok(Self::Attack),
            "brick" => Ok(Self::Brick),
            other => Err(ParseError::InvalidValue {
                kind: "strategy",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_three_ways() {
        let mut dir = SweepDirection::Left;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(dir);
            dir = dir.next();
        }
        assert_eq!(
            seen,
            vec![
                SweepDirection::Left,
                SweepDirection::Right,
                SweepDirection::Forward,
                SweepDirection::Left,
                SweepDirection::Right,
                SweepDirection::Forward,
            ]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("left".parse::<SweepDirection>(), Ok(SweepDirection::Left));
        assert_eq!(" RIGHT ".parse::<SweepDirection>(), Ok(SweepDirection::Right));
        assert_eq!("center".parse::<SweepDirection>(), Ok(SweepDirection::Forward));
        assert!("up".parse::<SweepDirection>().is_err());

        assert_eq!("brick".parse::<Strategy>(), Ok(Strategy::Brick));
        assert!("turtle".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_u8_roundtrip_for_atomic_storage() {
        for dir in [SweepDirection::Left, SweepDirection::Right, SweepDirection::Forward] {
            let raw: u8 = dir.into();
            assert_eq!(SweepDirection::try_from(raw).ok(), Some(dir));
        }
    }
}
