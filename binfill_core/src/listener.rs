//! Background inbound-command listening.
//!
//! Spawns a thread that drains raw payloads from the transport's channel and
//! dispatches them to the shared [`ResetSignal`]. The scheduler tick never
//! blocks on this thread and vice versa; the latch is the only state they
//! share.
//!
//! Safety: each `CommandListener` spawns exactly one thread that is shut
//! down when the listener is dropped, preventing thread leaks.
use crate::command;
use crate::reset::ResetSignal;
use crossbeam_channel as xch;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Poll interval for the shutdown flag while no payload is pending.
const RECV_TICK: Duration = Duration::from_millis(50);

pub struct CommandListener {
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    /// Count of payloads seen so far, dispatched or dropped.
    received: Arc<AtomicU64>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl CommandListener {
    pub fn spawn(rx: xch::Receiver<Vec<u8>>, reset: Arc<ResetSignal>) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let received = Arc::new(AtomicU64::new(0));
        let received_clone = received.clone();

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("command listener received shutdown signal");
                    break;
                }

                match rx.recv_timeout(RECV_TICK) {
                    Ok(payload) => {
                        received_clone.fetch_add(1, Ordering::Relaxed);
                        command::dispatch(&payload, &reset);
                    }
                    Err(xch::RecvTimeoutError::Timeout) => {
                        // Nothing inbound; loop around to re-check shutdown.
                    }
                    Err(xch::RecvTimeoutError::Disconnected) => {
                        tracing::debug!("command channel closed, exiting listener");
                        break;
                    }
                }
            }
            tracing::trace!("command listener thread exiting cleanly");
        });

        Self {
            shutdown,
            received,
            join_handle: Some(join_handle),
        }
    }

    /// Number of payloads the listener has pulled off the channel.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

impl Drop for CommandListener {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);

        // The thread exits within one RECV_TICK: either the pending recv
        // times out and sees the flag, or the channel disconnects.
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("command listener joined successfully");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate (we're in Drop)
                    tracing::warn!(?e, "command listener panicked during shutdown");
                }
            }
        }
    }
}
