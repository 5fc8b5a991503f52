//! 信号邮箱
//!
//! 多生产者 / 单消费者的原子位域。生产者用 `fetch_or` 投递，控制线程在每个 tick
//! 开头用 `fetch_and` 一次性读取并清除（零超时、不阻塞）。
//!
//! 合并语义：两次读取之间重复投递的同一位只会被观察到一次。

use std::sync::atomic::{AtomicU32, Ordering};
use sumo_protocol::PendingSignals;

/// 信号邮箱
#[derive(Debug, Default)]
pub struct SignalMailbox {
    bits: AtomicU32,
}

impl SignalMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// 投递信号
    ///
    /// # 返回
    ///
    /// 若投递的某一位此前已处于待处理状态（被合并）返回 `true`。
    pub fn post(&self, signals: PendingSignals) -> bool {
        let prev = self.bits.fetch_or(signals.bits(), Ordering::AcqRel);
        prev & signals.bits() != 0
    }

    /// 读取并清除 `mask` 中的位
    pub fn take(&self, mask: PendingSignals) -> PendingSignals {
        let prev = self.bits.fetch_and(!mask.bits(), Ordering::AcqRel);
        PendingSignals::from_bits_truncate(prev) & mask
    }

    /// 读取并清除所有位
    pub fn take_all(&self) -> PendingSignals {
        PendingSignals::from_bits_truncate(self.bits.swap(0, Ordering::AcqRel))
    }

    /// 丢弃 `mask` 中的位
    pub fn clear(&self, mask: PendingSignals) {
        self.bits.fetch_and(!mask.bits(), Ordering::AcqRel);
    }

    /// 查看待处理位（不清除）
    pub fn peek(&self) -> PendingSignals {
        PendingSignals::from_bits_truncate(self.bits.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_post_and_take_all() {
        let mailbox = SignalMailbox::new();
        assert!(!mailbox.post(PendingSignals::START_REQUESTED));
        assert_eq!(mailbox.peek(), PendingSignals::START_REQUESTED);

        assert_eq!(mailbox.take_all(), PendingSignals::START_REQUESTED);
        assert!(mailbox.peek().is_empty());
        assert!(mailbox.take_all().is_empty());
    }

    #[test]
    fn test_repeated_post_is_coalesced() {
        let mailbox = SignalMailbox::new();
        assert!(!mailbox.post(PendingSignals::STOP_REQUESTED));
        assert!(mailbox.post(PendingSignals::STOP_REQUESTED));
        assert!(!mailbox.post(PendingSignals::START_REQUESTED));
        assert_eq!(
            mailbox.take_all(),
            PendingSignals::STOP_REQUESTED | PendingSignals::START_REQUESTED
        );
    }

    #[test]
    fn test_take_mask_leaves_other_bits() {
        let mailbox = SignalMailbox::new();
        mailbox.post(PendingSignals::START_REQUESTED | PendingSignals::LINE_ALARM | PendingSignals::LINE_LEFT);

        let line = mailbox.take(PendingSignals::LINE_MASK);
        assert_eq!(line, PendingSignals::LINE_ALARM | PendingSignals::LINE_LEFT);
        assert_eq!(mailbox.peek(), PendingSignals::START_REQUESTED);

        mailbox.clear(PendingSignals::START_REQUESTED);
        assert!(mailbox.peek().is_empty());
    }

    #[test]
    fn test_concurrent_producers() {
        let mailbox = Arc::new(SignalMailbox::new());
        let producers: Vec<_> = [
            PendingSignals::START_REQUESTED,
            PendingSignals::STOP_REQUESTED,
            PendingSignals::LINE_ALARM,
            PendingSignals::LINE_RIGHT,
        ]
        .into_iter()
        .map(|bit| {
            let mailbox = mailbox.clone();
            thread::spawn(move || {
                for _ in 0..1000 {
                    mailbox.post(bit);
                }
            })
        })
        .collect();

        for handle in producers {
            handle.join().unwrap();
        }

        // 每一位至少被观察到一次，且不会凭空出现 LINE_LEFT
        let bits = mailbox.take_all();
        assert!(bits.contains(PendingSignals::START_REQUESTED | PendingSignals::STOP_REQUESTED));
        assert!(bits.contains(PendingSignals::LINE_ALARM | PendingSignals::LINE_RIGHT));
        assert!(!bits.contains(PendingSignals::LINE_LEFT));
    }
}
