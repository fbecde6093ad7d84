#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core bin monitoring logic (hardware-agnostic).
//!
//! This crate decides *when* a distance measurement is trustworthy and turns
//! it into a fill-level record. All hardware and transport interactions go
//! through the `binfill_traits` contracts.
//!
//! ## Architecture
//!
//! - **Scheduling**: motion-debounced settle/cooldown state machine
//!   (`Monitor`)
//! - **Fill math**: baseline/current distance to clamped percentage
//!   (`fill` module)
//! - **Reset latch**: cross-thread read-and-clear reset requests (`reset`)
//! - **Presentation**: fixed-width bar and color gradient (`display`)
//! - **Inbound commands**: payload decoding and dispatch (`command`,
//!   `listener`)
//! - **Orchestration**: paced tick loop with record fan-out (`runner`)

// Module declarations
pub mod command;
pub mod conversions;
pub mod display;
pub mod error;
pub mod fill;
pub mod listener;
pub mod mocks;
pub mod reset;
pub mod runner;
pub mod util;

use crate::error::BuildError;
use crate::reset::ResetSignal;
use binfill_traits::clock::{Clock, MonotonicClock};
use binfill_traits::{MeasurementRecord, SensorPort};
use std::sync::Arc;
use std::time::Instant;

/// Scheduler timing knobs, in milliseconds.
#[derive(Debug, Clone)]
pub struct TimingCfg {
    /// Minimum spacing between two completed measurements.
    pub cooldown_ms: u64,
    /// Wait after motion detection before trusting a distance reading.
    pub settle_delay_ms: u64,
}

impl Default for TimingCfg {
    fn default() -> Self {
        Self {
            cooldown_ms: 10_000,
            settle_delay_ms: 5_000,
        }
    }
}

/// Where the scheduler currently is between motion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not tracking a motion event.
    Idle,
    /// Motion detected; the settle timer is running toward a measurement.
    WaitingForSettle,
}

/// Public outcome of a single scheduler tick.
#[derive(Debug)]
pub enum TickOutcome {
    /// Nothing to do this tick.
    Quiet,
    /// Motion accepted; settle timer started.
    Armed,
    /// Settle timer still running.
    Waiting,
    /// A reset trigger (button or remote) re-sampled the baseline.
    Rebaselined,
    /// The settle delay elapsed and a measurement was completed.
    Measured(MeasurementRecord),
}

/// The measurement scheduler. Owns the baseline distance and all
/// last-measurement bookkeeping; the only state it shares with another
/// context is the [`ResetSignal`].
pub struct Monitor<P: SensorPort> {
    port: P,
    timing: TimingCfg,
    bin_id: String,
    reset: Arc<ResetSignal>,
    // Unified clock for deterministic time in tests
    clock: Arc<dyn Clock + Send + Sync>,
    // Epoch Instant for computing monotonic milliseconds
    epoch: Instant,

    baseline: Option<f32>,
    percentage: f32,
    state: SchedulerState,
    // ms since epoch of the motion detection that armed the settle timer
    detected_at_ms: u64,
    // ms since epoch of the last completed measurement; None until the first
    // one, so the very first motion event is never cooled down
    last_measured_ms: Option<u64>,
}

impl<P: SensorPort> core::fmt::Debug for Monitor<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Monitor")
            .field("bin_id", &self.bin_id)
            .field("state", &self.state)
            .field("baseline", &self.baseline)
            .field("percentage", &self.percentage)
            .finish()
    }
}

impl<P: SensorPort> Monitor<P> {
    /// Start building a Monitor.
    pub fn builder() -> MonitorBuilder<P> {
        MonitorBuilder::default()
    }

    /// Reset per-run state and sample the bin-empty baseline. Call once
    /// before ticking.
    pub fn begin(&mut self) {
        self.epoch = self.clock.now();
        self.state = SchedulerState::Idle;
        self.detected_at_ms = 0;
        self.last_measured_ms = None;
        self.percentage = 0.0;
        self.baseline = self.sample_baseline();
        tracing::info!(bin_id = %self.bin_id, baseline = ?self.baseline, "baseline initialized");
    }

    /// One scheduler tick. Never fails: sensor faults and invariant
    /// violations are absorbed per the unknown-as-empty policy.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.ms_since(self.epoch);

        // Sample both reset triggers up front. The latch is read-and-clear
        // regardless of the button so that a button press and a remote reset
        // landing on the same tick collapse into one re-baseline.
        let button = self.port.read_button().unwrap_or(false);
        let remote = self.reset.take_if_pending();
        if button || remote {
            self.rebaseline(button, remote);
            return TickOutcome::Rebaselined;
        }

        match self.state {
            SchedulerState::Idle => {
                // An absent motion reading skips the transition entirely.
                if self.port.read_motion() != Some(true) {
                    return TickOutcome::Quiet;
                }
                if !self.cooldown_elapsed(now) {
                    tracing::trace!(now_ms = now, "motion ignored during cooldown");
                    return TickOutcome::Quiet;
                }
                self.detected_at_ms = now;
                self.state = SchedulerState::WaitingForSettle;
                tracing::debug!(
                    now_ms = now,
                    settle_delay_ms = self.timing.settle_delay_ms,
                    "motion detected, settle timer armed"
                );
                TickOutcome::Armed
            }
            SchedulerState::WaitingForSettle => {
                if now.saturating_sub(self.detected_at_ms) < self.timing.settle_delay_ms {
                    return TickOutcome::Waiting;
                }
                let record = self.measure(now);
                TickOutcome::Measured(record)
            }
        }
    }

    /// Latest computed fill level.
    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    /// Current bin-empty reference distance, if known.
    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn bin_id(&self) -> &str {
        &self.bin_id
    }

    /// The shared latch remote handlers should request resets through.
    pub fn reset_signal(&self) -> Arc<ResetSignal> {
        Arc::clone(&self.reset)
    }

    pub fn clock(&self) -> Arc<dyn Clock + Send + Sync> {
        Arc::clone(&self.clock)
    }

    fn cooldown_elapsed(&self, now: u64) -> bool {
        match self.last_measured_ms {
            None => true,
            Some(t) => now.saturating_sub(t) >= self.timing.cooldown_ms,
        }
    }

    fn rebaseline(&mut self, button: bool, remote: bool) {
        self.baseline = self.sample_baseline();
        self.percentage = 0.0;
        self.detected_at_ms = 0;
        self.last_measured_ms = None;
        self.state = SchedulerState::Idle;
        tracing::info!(
            bin_id = %self.bin_id,
            button,
            remote,
            baseline = ?self.baseline,
            "baseline re-sampled"
        );
    }

    fn measure(&mut self, now: u64) -> MeasurementRecord {
        let current = self.port.read_distance();
        if current.is_none() {
            tracing::warn!(bin_id = %self.bin_id, "distance unreadable, reporting empty");
        }
        self.percentage = fill::fill_percentage(self.baseline, current);
        self.last_measured_ms = Some(now);
        self.state = SchedulerState::Idle;
        let record = MeasurementRecord {
            bin_id: self.bin_id.clone(),
            percentage: self.percentage,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        tracing::debug!(
            bin_id = %self.bin_id,
            percentage = self.percentage,
            distance = ?current,
            "measurement complete"
        );
        record
    }

    fn sample_baseline(&mut self) -> Option<f32> {
        match self.port.read_distance() {
            // A non-positive reference cannot yield a meaningful ratio;
            // treat it as unknown.
            Some(d) if d > 0.0 => Some(d),
            Some(d) => {
                tracing::warn!(distance = d, "non-positive baseline treated as unknown");
                None
            }
            None => {
                tracing::warn!("baseline unreadable, fill reported as 0 until reset");
                None
            }
        }
    }
}

/// Builder for [`Monitor`]. All fields are validated on `build()`.
pub struct MonitorBuilder<P: SensorPort> {
    port: Option<P>,
    bin_id: Option<String>,
    timing: TimingCfg,
    reset: Option<Arc<ResetSignal>>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
}

impl<P: SensorPort> Default for MonitorBuilder<P> {
    fn default() -> Self {
        Self {
            port: None,
            bin_id: None,
            timing: TimingCfg::default(),
            reset: None,
            clock: None,
        }
    }
}

impl<P: SensorPort> MonitorBuilder<P> {
    pub fn with_port(mut self, port: P) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_bin_id(mut self, id: impl Into<String>) -> Self {
        self.bin_id = Some(id.into());
        self
    }

    pub fn with_timing(mut self, timing: TimingCfg) -> Self {
        self.timing = timing;
        self
    }

    /// Share a latch created elsewhere (e.g. already handed to a listener).
    pub fn with_reset_signal(mut self, reset: Arc<ResetSignal>) -> Self {
        self.reset = Some(reset);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> error::Result<Monitor<P>> {
        let port = self
            .port
            .ok_or_else(|| eyre::Report::new(BuildError::MissingPort))?;
        let bin_id = self
            .bin_id
            .ok_or_else(|| eyre::Report::new(BuildError::MissingBinId))?;
        if bin_id.trim().is_empty() {
            return Err(eyre::Report::new(BuildError::InvalidTiming(
                "bin id must not be empty",
            )));
        }
        if self.timing.settle_delay_ms == 0 {
            return Err(eyre::Report::new(BuildError::InvalidTiming(
                "settle_delay_ms must be >= 1",
            )));
        }
        if self.timing.cooldown_ms == 0 {
            return Err(eyre::Report::new(BuildError::InvalidTiming(
                "cooldown_ms must be >= 1",
            )));
        }
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));
        let epoch = clock.now();
        Ok(Monitor {
            port,
            timing: self.timing,
            bin_id,
            reset: self.reset.unwrap_or_default(),
            clock,
            epoch,
            baseline: None,
            percentage: 0.0,
            state: SchedulerState::Idle,
            detected_at_ms: 0,
            last_measured_ms: None,
        })
    }
}
