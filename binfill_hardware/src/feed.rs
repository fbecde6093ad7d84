//! JSONL feed publisher — the simulation stand-in for the broker transport.
//!
//! Each published record becomes one `{"topic": ..., "payload": ...}` line
//! appended to the feed file, mirroring what a subscriber on the fullness
//! topic would see.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use binfill_traits::{MeasurementRecord, RecordPublisher};

pub struct JsonlPublisher {
    topic: String,
    path: PathBuf,
}

impl JsonlPublisher {
    pub fn new(topic: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            topic: topic.into(),
            path: path.into(),
        }
    }
}

impl RecordPublisher for JsonlPublisher {
    fn publish(
        &mut self,
        record: &MeasurementRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let line = serde_json::json!({
            "topic": self.topic,
            "payload": record,
        });
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        tracing::debug!(topic = %self.topic, "record published to feed");
        Ok(())
    }
}
