#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and validation for the bin monitor.
//!
//! `Config` and its sub-structs are deserialized from TOML and validated
//! before the monitor is built. Topic names follow the original deployment's
//! shape: `<prefix>/<bin_id>/fullness` outbound, `<prefix>/<bin_id>/msg`
//! inbound.
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BinCfg {
    /// Identifier of the monitored bin, e.g. "03". Embedded in records and
    /// topic names.
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingCfg {
    /// Polling cadence of the scheduler tick (Hz).
    pub tick_hz: u32,
    /// Wait after a motion detection before trusting a distance reading (ms).
    pub settle_delay_ms: u64,
    /// Minimum spacing between two completed measurements (ms).
    pub cooldown_ms: u64,
}

impl Default for TimingCfg {
    fn default() -> Self {
        Self {
            tick_hz: 10,
            settle_delay_ms: 5_000,
            cooldown_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayCfg {
    /// Display character capacity; the fill bar is rendered at this width.
    pub width: usize,
}

impl Default for DisplayCfg {
    fn default() -> Self {
        Self { width: 16 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PersistenceCfg {
    /// Destination file for the latest record (best effort, last-write-wins).
    pub path: String,
}

impl Default for PersistenceCfg {
    fn default() -> Self {
        Self {
            path: "last_bin_data.json".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChannelCfg {
    /// Topic namespace prefix shared by all bins of a deployment.
    pub topic_prefix: String,
    /// Feed file the simulated transport appends published lines to.
    pub feed: String,
}

impl Default for ChannelCfg {
    fn default() -> Self {
        Self {
            topic_prefix: "bins".into(),
            feed: "binfill_feed.jsonl".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AlertCfg {
    /// Fill percentage at or above which a measurement is flagged as
    /// "needs emptying".
    pub percent: f32,
}

impl Default for AlertCfg {
    fn default() -> Self {
        Self { percent: 75.0 }
    }
}

/// GPIO wiring, used only by the `hardware` sensor backend.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PinsCfg {
    pub ultrasonic: u8,
    pub motion: u8,
    pub button: u8,
}

impl Default for PinsCfg {
    fn default() -> Self {
        Self {
            ultrasonic: 2,
            motion: 5,
            button: 3,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bin: Option<BinCfg>,
    pub timing: TimingCfg,
    pub display: DisplayCfg,
    pub persistence: PersistenceCfg,
    pub channel: ChannelCfg,
    pub alert: AlertCfg,
    pub pins: PinsCfg,
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bin: None,
            timing: TimingCfg::default(),
            display: DisplayCfg::default(),
            persistence: PersistenceCfg::default(),
            channel: ChannelCfg::default(),
            alert: AlertCfg::default(),
            pins: PinsCfg::default(),
            logging: Logging::default(),
        }
    }
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    /// Outbound fullness topic for a bin.
    pub fn fullness_topic(&self, bin_id: &str) -> String {
        format!("{}/{}/fullness", self.channel.topic_prefix, bin_id)
    }

    /// Inbound command topic for a bin.
    pub fn command_topic(&self, bin_id: &str) -> String {
        format!("{}/{}/msg", self.channel.topic_prefix, bin_id)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if let Some(bin) = &self.bin {
            if bin.id.trim().is_empty() {
                eyre::bail!("bin.id must not be empty");
            }
        }

        // Timing
        if self.timing.tick_hz == 0 {
            eyre::bail!("timing.tick_hz must be > 0");
        }
        if self.timing.tick_hz > 1_000 {
            eyre::bail!("timing.tick_hz is unreasonably large (>1kHz)");
        }
        if self.timing.settle_delay_ms == 0 {
            eyre::bail!("timing.settle_delay_ms must be >= 1");
        }
        if self.timing.cooldown_ms == 0 {
            eyre::bail!("timing.cooldown_ms must be >= 1");
        }
        if self.timing.settle_delay_ms > 60 * 60 * 1000 {
            eyre::bail!("timing.settle_delay_ms is unreasonably large (>1h)");
        }
        if self.timing.cooldown_ms > 24 * 60 * 60 * 1000 {
            eyre::bail!("timing.cooldown_ms is unreasonably large (>24h)");
        }

        // Display
        if self.display.width == 0 {
            eyre::bail!("display.width must be >= 1");
        }
        if self.display.width > 256 {
            eyre::bail!("display.width is unreasonably large (>256 chars)");
        }

        // Persistence / channel
        if self.persistence.path.trim().is_empty() {
            eyre::bail!("persistence.path must not be empty");
        }
        if self.channel.topic_prefix.trim().is_empty() {
            eyre::bail!("channel.topic_prefix must not be empty");
        }

        // Alert
        if !(self.alert.percent > 0.0 && self.alert.percent <= 100.0) {
            eyre::bail!("alert.percent must be in (0.0, 100.0]");
        }

        Ok(())
    }
}
