//! 控制循环
//!
//! 固定周期调用状态机：绝对时间表（`next += period`），用 `spin_sleep` 睡到下一个
//! 截止时间。某个 tick 超时（例如阻塞转向）则计数并以当前时刻重新锚定时间表，
//! 不追赶错过的周期。

use crate::state::SumoContext;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use sumo_control::SumoMachine;
use sumo_hal::{ActuatorAdapter, SensorAdapter};
use sumo_protocol::RobotState;
use tracing::{error, info, trace, warn};

/// 控制循环配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// tick 周期
    pub tick_period: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(10),
        }
    }
}

/// 控制线程存活标记
///
/// 离开作用域时清除 `control_alive`，适配器 panic 导致的栈展开同样生效。
struct AliveGuard<'a> {
    ctx: &'a SumoContext,
}

impl Drop for AliveGuard<'_> {
    fn drop(&mut self) {
        self.ctx.control_alive.store(false, Ordering::Release);
        if std::thread::panicking() {
            error!("Control loop aborted by a panic");
        }
    }
}

/// 控制循环主函数（在控制线程中运行）
///
/// `is_running` 被置为 `false` 后在下一个 tick 边界退出，退出前停车。
pub fn control_loop<S, A, const N: usize>(
    mut machine: SumoMachine<S, A, N>,
    ctx: Arc<SumoContext>,
    is_running: Arc<AtomicBool>,
    config: LoopConfig,
) where
    S: SensorAdapter<N>,
    A: ActuatorAdapter,
{
    let _alive = AliveGuard { ctx: &ctx };
    info!("Control loop started ({:?} per tick)", config.tick_period);
    let mut next_deadline = Instant::now();

    while is_running.load(Ordering::Acquire) {
        let now = Instant::now();
        let previous = machine.state();

        match machine.tick(now) {
            Ok(state) => {
                if state == RobotState::Turning && previous != RobotState::Turning {
                    ctx.metrics.escapes.fetch_add(1, Ordering::Relaxed);
                }
            },
            Err(_) => {
                ctx.metrics.inconsistent_states.fetch_add(1, Ordering::Relaxed);
            },
        }

        ctx.metrics.ticks.fetch_add(1, Ordering::Relaxed);
        ctx.publish(&machine.snapshot());

        next_deadline += config.tick_period;
        let after = Instant::now();
        if after >= next_deadline {
            let late = after - next_deadline;
            ctx.metrics.overruns.fetch_add(1, Ordering::Relaxed);
            warn!("Tick overrun by {:?} (state: {})", late, machine.state());
            next_deadline = after;
        } else {
            trace!("tick done, sleeping {:?}", next_deadline - after);
            spin_sleep::sleep(next_deadline - after);
        }
    }

    machine.shutdown();
    ctx.publish(&machine.snapshot());
    info!("Control loop stopped");
}
