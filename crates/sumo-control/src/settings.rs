//! 运行时可调开关
//!
//! 命令源线程写、控制线程读。控制线程只在需要时读取（进入 `Searching` 时读取扫描偏向，
//! 每个 tick 读取边线开关），因此 `Relaxed` 内存序即可。

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use sumo_protocol::SweepDirection;

/// 共享设置
#[derive(Debug)]
pub struct SharedSettings {
    line_handling: AtomicBool,
    search_bias: AtomicU8,
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new(true, SweepDirection::default())
    }
}

impl SharedSettings {
    pub fn new(line_handling: bool, search_bias: SweepDirection) -> Self {
        Self {
            line_handling: AtomicBool::new(line_handling),
            search_bias: AtomicU8::new(search_bias.into()),
        }
    }

    /// 是否启用边线处理
    pub fn line_handling(&self) -> bool {
        self.line_handling.load(Ordering::Relaxed)
    }

    pub fn set_line_handling(&self, enabled: bool) {
        self.line_handling.store(enabled, Ordering::Relaxed);
    }

    /// 扫描起始方向
    ///
    /// 无效值回退为 `Left`。
    pub fn search_bias(&self) -> SweepDirection {
        SweepDirection::try_from(self.search_bias.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn set_search_bias(&self, bias: SweepDirection) {
        self.search_bias.store(bias.into(), Ordering::Relaxed);
    }
}
