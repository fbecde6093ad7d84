//! The polling loop that drives the scheduler and fans completed
//! measurements out to the display, store, and publisher collaborators.

use crate::display::DisplayPresenter;
use crate::{Monitor, TickOutcome};
use binfill_traits::{DisplayDevice, RecordPublisher, RecordStore, SensorPort};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// The three sinks a completed measurement is delivered to. Every delivery
/// is best-effort: a failing collaborator is logged and skipped, and the
/// loop carries on.
pub struct Outputs {
    pub display: Box<dyn DisplayDevice>,
    pub store: Box<dyn RecordStore>,
    pub publisher: Box<dyn RecordPublisher>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub measurements: u64,
    pub resets: u64,
    pub last_percentage: f32,
}

/// Run the monitor until the shutdown flag is raised or the optional tick
/// limit is reached. The pace comes from the monitor's injected clock, so
/// tests can drive the whole loop with simulated time.
pub fn run<P: SensorPort>(
    monitor: &mut Monitor<P>,
    presenter: &DisplayPresenter,
    outputs: &mut Outputs,
    tick_hz: u32,
    alert_percent: f32,
    shutdown: &AtomicBool,
    max_ticks: Option<u64>,
) -> RunSummary {
    let clock = monitor.clock();
    let period = Duration::from_millis(crate::util::period_ms(tick_hz));
    let mut summary = RunSummary::default();

    monitor.begin();
    tracing::info!(
        bin_id = %monitor.bin_id(),
        tick_hz,
        "monitor loop start"
    );

    while !shutdown.load(Ordering::Relaxed) {
        if let Some(limit) = max_ticks {
            if summary.ticks >= limit {
                break;
            }
        }
        summary.ticks += 1;

        match monitor.tick() {
            TickOutcome::Quiet | TickOutcome::Waiting | TickOutcome::Armed => {}
            TickOutcome::Rebaselined => {
                summary.resets += 1;
                summary.last_percentage = monitor.percentage();
            }
            TickOutcome::Measured(record) => {
                summary.measurements += 1;
                summary.last_percentage = record.percentage;
                if record.percentage >= alert_percent {
                    tracing::warn!(
                        bin_id = %record.bin_id,
                        percentage = record.percentage,
                        "bin needs emptying"
                    );
                }
                presenter.present(outputs.display.as_mut(), record.percentage);
                if let Err(e) = outputs.store.save(&record) {
                    tracing::warn!(error = %e, "record save failed");
                }
                if let Err(e) = outputs.publisher.publish(&record) {
                    tracing::warn!(error = %e, "record publish failed");
                }
            }
        }

        clock.sleep(period);
    }

    tracing::info!(
        ticks = summary.ticks,
        measurements = summary.measurements,
        resets = summary.resets,
        "monitor loop stop"
    );
    summary
}
