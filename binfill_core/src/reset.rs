//! Cross-thread reset latch.
//!
//! One producer context (the inbound command handler) sets the latch; one
//! consumer context (the scheduler tick) drains it with read-and-clear
//! semantics. Requests arriving between two consumptions collapse into a
//! single re-baseline.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ResetSignal {
    pending: AtomicBool,
}

impl ResetSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a re-baseline. Idempotent until consumed.
    pub fn request_reset(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consume a pending request. Returns true at most once per request;
    /// the read-and-clear is a single atomic swap, so a concurrent
    /// `request_reset` is either observed now or by the next call, never
    /// dropped.
    pub fn take_if_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::ResetSignal;
    use std::sync::Arc;

    #[test]
    fn take_is_true_then_false() {
        let signal = ResetSignal::new();
        signal.request_reset();
        assert!(signal.take_if_pending());
        assert!(!signal.take_if_pending());
    }

    #[test]
    fn nothing_pending_initially() {
        assert!(!ResetSignal::new().take_if_pending());
    }

    #[test]
    fn rapid_requests_collapse_to_one() {
        let signal = ResetSignal::new();
        signal.request_reset();
        signal.request_reset();
        signal.request_reset();
        assert!(signal.take_if_pending());
        assert!(!signal.take_if_pending());
    }

    #[test]
    fn request_from_another_thread_is_observed() {
        let signal = Arc::new(ResetSignal::new());
        let producer = Arc::clone(&signal);
        std::thread::spawn(move || producer.request_reset())
            .join()
            .unwrap();
        assert!(signal.take_if_pending());
    }
}
