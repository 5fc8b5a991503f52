//! 运行指标
//!
//! 原子计数器，控制线程与命令源线程写入，任意线程读取快照。

use std::sync::atomic::{AtomicU64, Ordering};

/// 运行指标（原子计数器）
#[derive(Debug, Default)]
pub struct SumoMetrics {
    /// 已执行的 tick 数
    pub ticks: AtomicU64,
    /// tick 超时次数（本周期结束时已过下一周期的截止时间）
    pub overruns: AtomicU64,
    /// 开始的逃逸机动次数
    pub escapes: AtomicU64,
    /// start 请求次数
    pub start_requests: AtomicU64,
    /// stop 请求次数
    pub stop_requests: AtomicU64,
    /// 被合并的信号投递次数
    pub coalesced_signals: AtomicU64,
    /// 不一致状态恢复次数
    pub inconsistent_states: AtomicU64,
}

impl SumoMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
            escapes: self.escapes.load(Ordering::Relaxed),
            start_requests: self.start_requests.load(Ordering::Relaxed),
            stop_requests: self.stop_requests.load(Ordering::Relaxed),
            coalesced_signals: self.coalesced_signals.load(Ordering::Relaxed),
            inconsistent_states: self.inconsistent_states.load(Ordering::Relaxed),
        }
    }

    /// 清零所有计数器
    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.overruns.store(0, Ordering::Relaxed);
        self.escapes.store(0, Ordering::Relaxed);
        self.start_requests.store(0, Ordering::Relaxed);
        self.stop_requests.store(0, Ordering::Relaxed);
        self.coalesced_signals.store(0, Ordering::Relaxed);
        self.inconsistent_states.store(0, Ordering::Relaxed);
    }
}

/// 指标快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub ticks: u64,
    pub overruns: u64,
    pub escapes: u64,
    pub start_requests: u64,
    pub stop_requests: u64,
    pub coalesced_signals: u64,
    pub inconsistent_states: u64,
}

impl MetricsSnapshot {
    /// 超时率（百分比）
    pub fn overrun_rate(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.overruns as f64 / self.ticks as f64 * 100.0
        }
    }
}
