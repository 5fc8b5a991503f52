//! 线程辅助

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

/// 带超时的线程 join
///
/// 标准库的 `JoinHandle::join` 无超时参数，这里借助看门狗线程和 `recv_timeout` 实现。
pub(crate) trait JoinTimeout {
    fn join_timeout(self, timeout: Duration) -> std::thread::Result<()>;
}

impl<T: Send + 'static> JoinTimeout for JoinHandle<T> {
    fn join_timeout(self, timeout: Duration) -> std::thread::Result<()> {
        let (tx, rx) = mpsc::channel();

        // 看门狗线程代为 join；超时后它继续等待，随进程退出回收
        std::thread::spawn(move || {
            let _ = tx.send(self.join().map(|_| ()));
        });

        // 阻塞等待，不忙等
        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "thread join timeout",
            ))),
            // 看门狗未发送即退出
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "join watchdog exited unexpectedly",
            ))),
        }
    }
}
