//! 共享上下文与状态发布
//!
//! 控制线程每个 tick 通过 `ArcSwap` 发布一次 [`SumoStatus`]，读者无锁读取，
//! 不会阻塞控制线程。

use crate::metrics::SumoMetrics;
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use sumo_control::{MachineSnapshot, SharedSettings, SignalMailbox};
use sumo_protocol::{LineClass, OpponentPosition, RobotState, Strategy, SweepDirection};

/// 状态报告
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SumoStatus {
    pub state: RobotState,
    pub strategy: Strategy,
    pub line_handling: bool,
    pub search_bias: SweepDirection,
    pub line: LineClass,
    pub opponent: OpponentPosition,
    pub sweep: SweepDirection,
    pub ticks: u64,
    pub escapes: u64,
}

impl SumoStatus {
    pub fn from_snapshot(snapshot: &MachineSnapshot, settings: &SharedSettings) -> Self {
        Self {
            state: snapshot.state,
            strategy: snapshot.strategy,
            line_handling: settings.line_handling(),
            search_bias: settings.search_bias(),
            line: snapshot.line,
            opponent: snapshot.opponent,
            sweep: snapshot.sweep,
            ticks: snapshot.ticks,
            escapes: snapshot.escapes,
        }
    }

    /// 是否处于比赛中（非 `Idle`）
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

impl fmt::Display for SumoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = match (self.line.left, self.line.right) {
            (false, false) => "clear",
            (true, false) => "left",
            (false, true) => "right",
            (true, true) => "left+right",
        };

        writeln!(f, "running: {}", if self.is_running() { "yes" } else { "no" })?;
        writeln!(f, "state: {}", self.state)?;
        writeln!(f, "strategy: {}", self.strategy)?;
        writeln!(f, "line handling: {}", if self.line_handling { "on" } else { "off" })?;
        writeln!(f, "search bias: {}", self.search_bias)?;
        writeln!(f, "line: {}", line)?;
        writeln!(f, "opponent: {}", self.opponent.as_str())?;
        writeln!(f, "sweep: {}", self.sweep)?;
        writeln!(f, "ticks: {}", self.ticks)?;
        write!(f, "escapes: {}", self.escapes)
    }
}

/// 控制线程与命令源共享的上下文
#[derive(Debug)]
pub struct SumoContext {
    pub mailbox: Arc<SignalMailbox>,
    pub settings: Arc<SharedSettings>,
    pub status: ArcSwap<SumoStatus>,
    pub metrics: SumoMetrics,
    /// 控制循环退出后置为 `false`
    pub control_alive: AtomicBool,
}

impl SumoContext {
    pub fn new(settings: SharedSettings) -> Self {
        let settings = Arc::new(settings);
        let status = SumoStatus {
            line_handling: settings.line_handling(),
            search_bias: settings.search_bias(),
            ..SumoStatus::default()
        };
        Self {
            mailbox: Arc::new(SignalMailbox::new()),
            settings,
            status: ArcSwap::from_pointee(status),
            metrics: SumoMetrics::new(),
            control_alive: AtomicBool::new(true),
        }
    }

    /// 发布状态（仅控制线程调用）
    pub fn publish(&self, snapshot: &MachineSnapshot) {
        self.status
            .store(Arc::new(SumoStatus::from_snapshot(snapshot, &self.settings)));
    }

    /// 读取最新状态
    pub fn status(&self) -> SumoStatus {
        **self.status.load()
    }

    pub fn is_control_alive(&self) -> bool {
        self.control_alive.load(Ordering::Acquire)
    }
}
