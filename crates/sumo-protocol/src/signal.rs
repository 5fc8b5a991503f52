//! 异步信号位域定义
//!
//! 命令源（控制台、遥控链路）与边线守卫向控制线程投递的通知位。
//! 位域语义为边沿触发：每个 tick 读取后即清除，两次 tick 之间重复投递的同一位会被合并。

use crate::line::{LineClass, TurnDirection};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// 待处理信号位域
///
/// # 位定义
///
/// | Bit | 名称 | 来源 |
/// |-----|------|------|
/// | 0 | `START_REQUESTED` | 命令源 |
/// | 1 | `STOP_REQUESTED` | 命令源 |
/// | 2 | `LINE_ALARM` | 边线守卫 |
/// | 3 | `LINE_LEFT` | 边线守卫 |
/// | 4 | `LINE_RIGHT` | 边线守卫 |
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PendingSignals(u32);

impl PendingSignals {
    pub const NONE: Self = Self(0);
    pub const START_REQUESTED: Self = Self(1 << 0);
    pub const STOP_REQUESTED: Self = Self(1 << 1);
    pub const LINE_ALARM: Self = Self(1 << 2);
    pub const LINE_LEFT: Self = Self(1 << 3);
    pub const LINE_RIGHT: Self = Self(1 << 4);

    /// 所有边线相关位（逃逸结束后统一清除）
    pub const LINE_MASK: Self = Self(Self::LINE_ALARM.0 | Self::LINE_LEFT.0 | Self::LINE_RIGHT.0);

    /// 所有已定义位
    pub const ALL: Self = Self(Self::START_REQUESTED.0 | Self::STOP_REQUESTED.0 | Self::LINE_MASK.0);

    /// 从原始位构造（丢弃未定义位）
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// 原始位
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 是否包含 `other` 的全部位
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// 是否与 `other` 有任意交集
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// 由边线分类构造告警位
    ///
    /// 告警位与方向位按位或组合（ALARM | LEFT / RIGHT）。
    pub fn line_alarm(line: LineClass) -> Self {
        let mut bits = Self::NONE;
        if line.left {
            bits |= Self::LINE_ALARM | Self::LINE_LEFT;
        }
        if line.right {
            bits |= Self::LINE_ALARM | Self::LINE_RIGHT;
        }
        bits
    }

    /// 从告警位还原边线分类
    pub fn line_class(self) -> LineClass {
        if !self.contains(Self::LINE_ALARM) {
            return LineClass::NONE;
        }
        LineClass {
            left: self.contains(Self::LINE_LEFT),
            right: self.contains(Self::LINE_RIGHT),
        }
    }

    /// 告警位对应的逃逸转向（无告警返回 None）
    pub fn escape_turn(self) -> Option<TurnDirection> {
        self.line_class().escape_turn()
    }
}

impl BitOr for PendingSignals {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for PendingSignals {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PendingSignals {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for PendingSignals {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for PendingSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(PendingSignals, &str); 5] = [
            (PendingSignals::START_REQUESTED, "START"),
            (PendingSignals::STOP_REQUESTED, "STOP"),
            (PendingSignals::LINE_ALARM, "LINE_ALARM"),
            (PendingSignals::LINE_LEFT, "LINE_LEFT"),
            (PendingSignals::LINE_RIGHT, "LINE_RIGHT"),
        ];

        if self.is_empty() {
            return f.write_str("PendingSignals(NONE)");
        }

        f.write_str("PendingSignals(")?;
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str(")")
    }
}
