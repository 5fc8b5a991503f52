//! 遥控链路
//!
//! 独立线程从 `crossbeam-channel` 接收文本命令（无线串口的行缓冲），
//! 解析后交给 [`SumoHandle`] 执行，应答写回可选的发送端。

use crate::error::DriverError;
use crate::robot::SumoHandle;
use crate::thread::JoinTimeout;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const REMOTE_THREAD: &str = "sumo-remote";

/// 接收超时（用于周期性检查退出标志）
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 遥控链路句柄
///
/// 发送端全部断开或本句柄被 drop 时线程退出。
pub struct RemoteLink {
    is_running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl RemoteLink {
    /// 线程是否仍在运行
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// 通知线程退出并等待
    pub fn shutdown(mut self) -> Result<(), DriverError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        self.is_running.store(false, Ordering::Release);
        let Some(handle) = self.thread.take() else {
            return Ok(());
        };
        handle.join_timeout(POLL_INTERVAL * 10).map_err(|_| {
            error!("Remote link thread failed to shut down");
            DriverError::Timeout
        })
    }
}

impl Drop for RemoteLink {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// 启动遥控链路线程
///
/// # 参数
///
/// - `handle`: 命令入口
/// - `commands`: 文本命令接收端（一行一条）
/// - `replies`: 应答发送端（`None` 表示不回传）
pub fn spawn_remote_link(
    handle: SumoHandle,
    commands: Receiver<String>,
    replies: Option<Sender<String>>,
) -> Result<RemoteLink, DriverError> {
    let is_running = Arc::new(AtomicBool::new(true));
    let is_running_thread = is_running.clone();

    let thread = std::thread::Builder::new()
        .name(REMOTE_THREAD.to_string())
        .spawn(move || remote_loop(handle, commands, replies, is_running_thread))
        .map_err(|source| DriverError::ThreadSpawn {
            name: REMOTE_THREAD,
            source,
        })?;

    Ok(RemoteLink {
        is_running,
        thread: Some(thread),
    })
}

fn remote_loop(
    handle: SumoHandle,
    commands: Receiver<String>,
    replies: Option<Sender<String>>,
    is_running: Arc<AtomicBool>,
) {
    info!("Remote link started");

    while is_running.load(Ordering::Acquire) {
        let line = match commands.recv_timeout(POLL_INTERVAL) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Remote command channel disconnected");
                break;
            },
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match handle.execute_line(line) {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Remote command '{}' rejected: {}", line, err);
                format!("error: {}", err)
            },
        };

        if let Some(replies) = &replies
            && replies.send(reply).is_err()
        {
            debug!("Remote reply channel closed");
        }
    }

    info!("Remote link stopped");
}
