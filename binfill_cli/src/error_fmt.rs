//! Human-readable error descriptions for the terminal.

/// Map an eyre::Report to a what/why/fix explanation.
pub fn humanize(err: &eyre::Report) -> String {
    use binfill_core::error::BuildError;

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingPort => {
                "What happened: No sensor port was provided to the monitor.\nLikely causes: The sensor backend failed to initialize or was not wired into the builder.\nHow to fix: Check the sensor wiring/pins, or run without the hardware feature to use the simulated backend.".to_string()
            }
            BuildError::MissingBinId => {
                "What happened: No bin id was configured.\nLikely causes: The config has no [bin] section and --bin-id was not passed.\nHow to fix: Add `[bin]\nid = \"03\"` to the config, or pass --bin-id.".to_string()
            }
            BuildError::InvalidTiming(msg) => format!(
                "What happened: Invalid monitor configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the [timing] section, then rerun."
            ),
        };
    }

    // String-based heuristics for errors coming from init or config.
    // Alternate formatting flattens the whole wrap_err chain into one line.
    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();

    if lower.contains("sensor pins") || lower.contains("gpio") {
        return "What happened: Failed to initialize the sensor pins.\nLikely causes: Incorrect pin numbers in [pins], or insufficient GPIO permissions.\nHow to fix: Fix the [pins] values in the config; ensure the process may access GPIO.".to_string();
    }

    if lower.contains("reading last record") {
        return format!(
            "What happened: {msg}.\nLikely causes: The monitor has not completed a measurement yet, or persistence.path points elsewhere.\nHow to fix: Run the monitor until a measurement lands, or correct persistence.path."
        );
    }

    if lower.contains("no bin id") {
        return format!("What happened: {msg}.");
    }

    format!(
        "What happened: {msg}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
    )
}
