//! GrovePi-style GPIO sensor backend (Linux, `hardware` feature).
//!
//! The Grove ultrasonic ranger multiplexes trigger and echo on one signal
//! pin; the PIR motion sensor and the reset button are plain digital
//! inputs. All driver faults degrade to `None` readings so the scheduler
//! never sees a hardware error unwind.

use std::time::{Duration, Instant};

use rppal::gpio::{Gpio, IoPin, InputPin, Level, Mode};
use tracing::{trace, warn};

use crate::error::{HwError, Result};
use crate::util::wait_for_level;
use binfill_traits::SensorPort;

/// Round-trip microseconds per centimeter at room temperature.
const US_PER_CM: f32 = 58.0;
/// Upper bound on a plausible echo; beyond this the ranger is out of range.
const ECHO_TIMEOUT: Duration = Duration::from_millis(40);
const ECHO_POLL: Duration = Duration::from_micros(5);

pub struct UltrasonicRanger {
    sig: IoPin,
}

impl UltrasonicRanger {
    pub fn new(gpio: &Gpio, pin: u8) -> Result<Self> {
        let sig = gpio
            .get(pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_io(Mode::Output);
        Ok(Self { sig })
    }

    /// Fire a trigger pulse and time the echo. Returns centimeters.
    pub fn measure_cm(&mut self) -> Result<f32> {
        self.sig.set_mode(Mode::Output);
        self.sig.set_low();
        spin_wait(Duration::from_micros(2));
        self.sig.set_high();
        spin_wait(Duration::from_micros(10));
        self.sig.set_low();

        self.sig.set_mode(Mode::Input);
        // Wait for the echo to start, then time how long it stays high.
        wait_for_level(|| self.sig.read() == Level::High, ECHO_TIMEOUT, ECHO_POLL)?;
        let high = wait_for_level(|| self.sig.read() == Level::Low, ECHO_TIMEOUT, ECHO_POLL)?;

        let cm = high.as_micros() as f32 / US_PER_CM;
        trace!(cm, "ultrasonic echo");
        Ok(cm)
    }
}

/// Short busy wait; the trigger pulse is far below timer-sleep granularity.
fn spin_wait(d: Duration) {
    let end = Instant::now() + d;
    while Instant::now() < end {
        std::hint::spin_loop();
    }
}

/// The real bin's sensor port: ranger + PIR + button.
pub struct GrovePort {
    ranger: UltrasonicRanger,
    motion: InputPin,
    button: InputPin,
}

impl GrovePort {
    pub fn new(ultrasonic_pin: u8, motion_pin: u8, button_pin: u8) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let ranger = UltrasonicRanger::new(&gpio, ultrasonic_pin)?;
        let motion = gpio
            .get(motion_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input();
        let button = gpio
            .get(button_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input_pulldown();
        Ok(Self {
            ranger,
            motion,
            button,
        })
    }
}

impl SensorPort for GrovePort {
    fn read_distance(&mut self) -> Option<f32> {
        match self.ranger.measure_cm() {
            Ok(cm) => Some(cm),
            Err(e) => {
                warn!(error = %e, "distance read failed");
                None
            }
        }
    }

    fn read_motion(&mut self) -> Option<bool> {
        // PIR output is high while presence is detected; the trait speaks
        // normalized polarity.
        Some(self.motion.read() == Level::High)
    }

    fn read_button(&mut self) -> Option<bool> {
        Some(self.button.read() == Level::High)
    }
}
