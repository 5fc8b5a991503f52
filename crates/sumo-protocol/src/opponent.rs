//! 对手位置分类定义

/// 传感器侧别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

/// 对手位置分类
///
/// 由左右两路测距读数推导：
/// - 两路都有效 → `Center`
/// - 仅左路有效 → `Left`
/// - 仅右路有效 → `Right`
/// - 都为哨兵值 → `Lost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpponentPosition {
    Center,
    Left,
    Right,
    #[default]
    Lost,
}

impl OpponentPosition {
    /// 是否已定位对手
    pub fn is_located(self) -> bool {
        self != Self::Lost
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
            Self::Lost => "lost",
        }
    }
}

/// 将驱动层原始测距值转换为读数
///
/// 测距驱动以负数（通常为 -1）表示"无检测"，超出 `u16` 范围的值按饱和处理。
pub fn distance_from_raw(raw: i32) -> Option<u16> {
    if raw < 0 {
        None
    } else {
        Some(u16::try_from(raw).unwrap_or(u16::MAX))
    }
}
