#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Sensor, display, persistence, and transport backends.
//!
//! The default build ships simulated backends good enough for development
//! and integration tests. The `hardware` feature (Linux only) adds the
//! GrovePi-style GPIO/I2C drivers for the real bin: ultrasonic ranger, PIR
//! motion sensor, momentary button, and the JHD1313 RGB character LCD.

pub mod error;
pub mod feed;
pub mod loopback;
pub mod store;
pub mod util;

#[cfg(feature = "hardware")]
pub mod grove;
#[cfg(feature = "hardware")]
pub mod lcd;

use binfill_traits::{DisplayDevice, Rgb, SensorPort};

/// Simulated bin: motion on every tick and a distance that shrinks by a
/// fixed step per read, so measurements show the bin steadily filling.
pub struct SimulatedSensors {
    distance: f32,
    step: f32,
}

impl SimulatedSensors {
    /// `empty_distance` is the bin-empty reference the first read returns.
    /// The per-read fill step can be overridden with the
    /// `BINFILL_SIM_FILL_STEP` environment variable (used by CLI tests).
    pub fn new(empty_distance: f32) -> Self {
        let step = std::env::var("BINFILL_SIM_FILL_STEP")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(5.0);
        Self {
            distance: empty_distance,
            step,
        }
    }
}

impl SensorPort for SimulatedSensors {
    fn read_distance(&mut self) -> Option<f32> {
        let d = self.distance;
        self.distance = (self.distance - self.step).max(0.0);
        tracing::trace!(distance = d, "simulated distance read");
        Some(d)
    }

    fn read_motion(&mut self) -> Option<bool> {
        Some(true)
    }

    fn read_button(&mut self) -> Option<bool> {
        Some(false)
    }
}

/// Terminal display backend: prints the frame a character LCD would show.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl DisplayDevice for ConsoleDisplay {
    fn render(
        &mut self,
        percentage: u8,
        bar: &str,
        color: Rgb,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!(
            "full {percentage:>3}% |{bar}| rgb({},{},{})",
            color.r, color.g, color.b
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_distance_shrinks_per_read() {
        let mut sensors = SimulatedSensors {
            distance: 100.0,
            step: 5.0,
        };
        let first = sensors.read_distance().unwrap();
        let second = sensors.read_distance().unwrap();
        assert!(second < first);
    }

    #[test]
    fn simulated_distance_floors_at_zero() {
        let mut sensors = SimulatedSensors {
            distance: 4.0,
            step: 5.0,
        };
        let _ = sensors.read_distance();
        assert_eq!(sensors.read_distance(), Some(0.0));
        assert_eq!(sensors.read_distance(), Some(0.0));
    }

    #[test]
    fn simulated_bin_is_always_busy_and_unpressed() {
        let mut sensors = SimulatedSensors::new(100.0);
        assert_eq!(sensors.read_motion(), Some(true));
        assert_eq!(sensors.read_button(), Some(false));
    }

    #[test]
    fn console_display_accepts_any_frame() {
        let mut display = ConsoleDisplay;
        display
            .render(42, ">>>>>>----------", Rgb { r: 107, g: 148, b: 0 })
            .unwrap();
    }
}
