//! 边线检测结果定义

/// 边线分类结果
///
/// 左右两个独立标志，分别来自阵列最左与最右的传感器。
/// 两侧可以同时触发（机器人正面压线），此时逃逸方向按右侧优先。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineClass {
    /// 最左传感器低于阈值
    pub left: bool,
    /// 最右传感器低于阈值
    pub right: bool,
}

impl LineClass {
    /// 未检测到边线
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };

    pub fn is_clear(self) -> bool {
        !self.left && !self.right
    }

    /// 单值视图：`NoLine | LineLeft | LineRight`（两侧同时触发时右侧优先）
    pub fn edge(self) -> LineEdge {
        if self.right {
            LineEdge::LineRight
        } else if self.left {
            LineEdge::LineLeft
        } else {
            LineEdge::NoLine
        }
    }

    /// 逃逸转向：远离检测到的边线
    pub fn escape_turn(self) -> Option<TurnDirection> {
        match self.edge() {
            LineEdge::NoLine => None,
            LineEdge::LineLeft => Some(TurnDirection::Right),
            LineEdge::LineRight => Some(TurnDirection::Left),
        }
    }
}

/// 边线单值分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEdge {
    NoLine,
    LineLeft,
    LineRight,
}

/// 原地转向方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// 带符号角度：向右为正，向左为负
    pub fn signed_angle(self, degrees: i16) -> i16 {
        let magnitude = degrees.saturating_abs();
        match self {
            Self::Right => magnitude,
            Self::Left => -magnitude,
        }
    }
}
