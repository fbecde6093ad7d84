//! In-process loopback transport.
//!
//! Stands in for the messaging channel when no broker is wired up: the
//! publisher end emits topic-tagged JSON frames, and the command injector
//! feeds raw inbound payloads to the core's command listener.

use binfill_traits::{MeasurementRecord, RecordPublisher};
use crossbeam_channel as xch;

/// Outbound side: a publisher plus the receiver a test (or bridge) drains.
pub fn publisher_pair(topic: impl Into<String>) -> (LoopbackPublisher, xch::Receiver<String>) {
    let (tx, rx) = xch::unbounded();
    (
        LoopbackPublisher {
            topic: topic.into(),
            tx,
        },
        rx,
    )
}

/// Inbound side: an injector plus the receiver handed to a
/// `CommandListener`.
pub fn command_channel() -> (CommandInjector, xch::Receiver<Vec<u8>>) {
    let (tx, rx) = xch::unbounded();
    (CommandInjector { tx }, rx)
}

pub struct LoopbackPublisher {
    topic: String,
    tx: xch::Sender<String>,
}

impl RecordPublisher for LoopbackPublisher {
    fn publish(
        &mut self,
        record: &MeasurementRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let frame = serde_json::json!({
            "topic": self.topic,
            "payload": record,
        });
        self.tx
            .send(frame.to_string())
            .map_err(|_| "loopback subscriber gone")?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct CommandInjector {
    tx: xch::Sender<Vec<u8>>,
}

impl CommandInjector {
    pub fn send_raw(&self, payload: Vec<u8>) -> bool {
        self.tx.send(payload).is_ok()
    }

    /// Inject the remote re-baseline command.
    pub fn send_reset(&self) -> bool {
        self.send_raw(br#"{"command":"reset"}"#.to_vec())
    }
}
