//! Test and helper doubles for binfill_core.

use binfill_traits::{DisplayDevice, MeasurementRecord, RecordPublisher, RecordStore, Rgb, SensorPort};

/// A port with fixed readings; useful as a quiet, healthy bin.
pub struct StaticPort {
    pub distance: Option<f32>,
    pub motion: Option<bool>,
    pub button: Option<bool>,
}

impl StaticPort {
    /// An empty bin at the given reference distance, nobody around.
    pub fn empty_bin(distance: f32) -> Self {
        Self {
            distance: Some(distance),
            motion: Some(false),
            button: Some(false),
        }
    }
}

impl SensorPort for StaticPort {
    fn read_distance(&mut self) -> Option<f32> {
        self.distance
    }
    fn read_motion(&mut self) -> Option<bool> {
        self.motion
    }
    fn read_button(&mut self) -> Option<bool> {
        self.button
    }
}

/// Display that accepts every frame and remembers the latest one.
#[derive(Default)]
pub struct NullDisplay {
    pub last: Option<(u8, String)>,
}

impl DisplayDevice for NullDisplay {
    fn render(
        &mut self,
        percentage: u8,
        bar: &str,
        _color: Rgb,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.last = Some((percentage, bar.to_string()));
        Ok(())
    }
}

/// Store that keeps every record in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub saved: Vec<MeasurementRecord>,
}

impl RecordStore for MemoryStore {
    fn save(
        &mut self,
        record: &MeasurementRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.saved.push(record.clone());
        Ok(())
    }
}

/// Publisher that keeps every record in memory.
#[derive(Default)]
pub struct MemoryPublisher {
    pub published: Vec<MeasurementRecord>,
}

impl RecordPublisher for MemoryPublisher {
    fn publish(
        &mut self,
        record: &MeasurementRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.published.push(record.clone());
        Ok(())
    }
}
