pub mod clock;

pub use clock::{Clock, MonotonicClock};

use serde::{Deserialize, Serialize};

/// One completed fill measurement. This is both the persisted schema and the
/// wire payload published on the messaging channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub bin_id: String,
    /// Fill level in percent, always within [0, 100].
    pub percentage: f32,
    /// RFC 3339 wall-clock timestamp of the measurement.
    pub timestamp: String,
}

/// RGB color for the display backlight/status gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Access to the bin's physical inputs. A `None` reading signals a transient
/// sensor fault; implementations must not panic or unwind into the caller.
pub trait SensorPort {
    /// Distance from the sensor to the top of the garbage, in the sensor's
    /// native range unit (centimeters for the ultrasonic ranger).
    fn read_distance(&mut self) -> Option<f32>;
    /// `Some(true)` when the motion sensor currently reports presence.
    fn read_motion(&mut self) -> Option<bool>;
    /// `Some(true)` while the reset button is held down.
    fn read_button(&mut self) -> Option<bool>;
}

pub trait DisplayDevice {
    fn render(
        &mut self,
        percentage: u8,
        bar: &str,
        color: Rgb,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Best-effort durable storage for the latest record (last-write-wins).
pub trait RecordStore {
    fn save(
        &mut self,
        record: &MeasurementRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Best-effort outbound reporting on the messaging channel.
pub trait RecordPublisher {
    fn publish(
        &mut self,
        record: &MeasurementRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
