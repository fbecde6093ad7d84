//! Monitor assembly and execution: config mapping, backend selection, and
//! the run/show/self-check commands.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use binfill_core::display::DisplayPresenter;
use binfill_core::listener::CommandListener;
use binfill_core::reset::ResetSignal;
use binfill_core::runner::{self, Outputs, RunSummary};
use binfill_core::{Monitor, TimingCfg, util};
use binfill_hardware::feed::JsonlPublisher;
use binfill_hardware::loopback;
use binfill_hardware::store::FileStore;
use eyre::WrapErr;

/// Reference distance the simulated bin reports when empty.
const SIM_EMPTY_DISTANCE: f32 = 100.0;

fn resolve_bin_id(cfg: &binfill_config::Config, overridden: Option<String>) -> eyre::Result<String> {
    overridden
        .or_else(|| cfg.bin.as_ref().map(|b| b.id.clone()))
        .ok_or_else(|| eyre::eyre!("no bin id: set [bin].id in the config or pass --bin-id"))
}

pub fn run(
    cfg: &binfill_config::Config,
    ticks: Option<u64>,
    bin_id: Option<String>,
    inject_reset_at: Option<u64>,
    json: bool,
) -> eyre::Result<()> {
    let bin_id = resolve_bin_id(cfg, bin_id)?;
    let reset = Arc::new(ResetSignal::new());

    // Inbound side of the channel: listener thread + injector for demos.
    let (injector, command_rx) = loopback::command_channel();
    let _listener = CommandListener::spawn(command_rx, Arc::clone(&reset));
    if let Some(at_tick) = inject_reset_at {
        let delay = Duration::from_millis(at_tick.saturating_mul(util::period_ms(cfg.timing.tick_hz)));
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            if injector.send_reset() {
                tracing::info!(at_tick, "injected remote reset");
            }
        });
    }

    let mut outputs = Outputs {
        display: make_display(cfg)?,
        store: Box::new(FileStore::new(&cfg.persistence.path)),
        publisher: Box::new(JsonlPublisher::new(
            cfg.fullness_topic(&bin_id),
            &cfg.channel.feed,
        )),
    };
    let presenter: DisplayPresenter = (&cfg.display).into();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
        })
        .wrap_err("installing Ctrl-C handler")?;
    }

    let mut monitor = build_monitor(cfg, &bin_id, Arc::clone(&reset))?;
    let summary = runner::run(
        &mut monitor,
        &presenter,
        &mut outputs,
        cfg.timing.tick_hz,
        cfg.alert.percent,
        &shutdown,
        ticks,
    );

    print_summary(&bin_id, &summary, json);
    Ok(())
}

pub fn show(cfg: &binfill_config::Config, json: bool) -> eyre::Result<()> {
    let record = FileStore::load_last(std::path::Path::new(&cfg.persistence.path))
        .wrap_err_with(|| format!("reading last record from {}", cfg.persistence.path))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!(
            "bin {}: {:.0}% full at {}",
            record.bin_id, record.percentage, record.timestamp
        );
    }
    Ok(())
}

pub fn self_check(cfg: &binfill_config::Config) -> eyre::Result<()> {
    let bin_id = resolve_bin_id(cfg, None).unwrap_or_else(|_| "self-check".into());
    let mut monitor = build_sim_monitor(cfg, &bin_id, Arc::new(ResetSignal::new()))?;
    monitor.begin();
    let outcome = monitor.tick();
    tracing::debug!(?outcome, "self-check tick");
    println!("self-check ok");
    Ok(())
}

fn print_summary(bin_id: &str, summary: &RunSummary, json: bool) {
    if json {
        let line = serde_json::json!({
            "bin_id": bin_id,
            "ticks": summary.ticks,
            "measurements": summary.measurements,
            "resets": summary.resets,
            "last_percentage": summary.last_percentage,
        });
        println!("{line}");
    } else {
        println!(
            "bin {bin_id}: {} ticks, {} measurements, {} resets, last fill {:.0}%",
            summary.ticks, summary.measurements, summary.resets, summary.last_percentage
        );
    }
}

#[cfg(feature = "hardware")]
fn build_monitor(
    cfg: &binfill_config::Config,
    bin_id: &str,
    reset: Arc<ResetSignal>,
) -> eyre::Result<Monitor<binfill_hardware::grove::GrovePort>> {
    let port = binfill_hardware::grove::GrovePort::new(
        cfg.pins.ultrasonic,
        cfg.pins.motion,
        cfg.pins.button,
    )
    .map_err(|e| eyre::eyre!("opening sensor pins: {e}"))?;
    Monitor::builder()
        .with_port(port)
        .with_bin_id(bin_id)
        .with_timing(TimingCfg::from(&cfg.timing))
        .with_reset_signal(reset)
        .build()
}

#[cfg(not(feature = "hardware"))]
fn build_monitor(
    cfg: &binfill_config::Config,
    bin_id: &str,
    reset: Arc<ResetSignal>,
) -> eyre::Result<Monitor<binfill_hardware::SimulatedSensors>> {
    build_sim_monitor(cfg, bin_id, reset)
}

fn build_sim_monitor(
    cfg: &binfill_config::Config,
    bin_id: &str,
    reset: Arc<ResetSignal>,
) -> eyre::Result<Monitor<binfill_hardware::SimulatedSensors>> {
    Monitor::builder()
        .with_port(binfill_hardware::SimulatedSensors::new(SIM_EMPTY_DISTANCE))
        .with_bin_id(bin_id)
        .with_timing(TimingCfg::from(&cfg.timing))
        .with_reset_signal(reset)
        .build()
}

#[cfg(feature = "hardware")]
fn make_display(
    cfg: &binfill_config::Config,
) -> eyre::Result<Box<dyn binfill_traits::DisplayDevice>> {
    match binfill_hardware::lcd::RgbLcd::new(cfg.display.width) {
        Ok(lcd) => Ok(Box::new(lcd)),
        Err(e) => {
            // The display is not safety-critical; fall back to the console.
            tracing::warn!(error = %e, "LCD unavailable, using console display");
            Ok(Box::new(binfill_hardware::ConsoleDisplay))
        }
    }
}

#[cfg(not(feature = "hardware"))]
fn make_display(
    _cfg: &binfill_config::Config,
) -> eyre::Result<Box<dyn binfill_traits::DisplayDevice>> {
    Ok(Box::new(binfill_hardware::ConsoleDisplay))
}
