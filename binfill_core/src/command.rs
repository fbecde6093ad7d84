//! Inbound command decoding.
//!
//! Payloads arrive as raw bytes from whatever transport the deployment uses.
//! Only well-formed JSON objects carrying a known `command` verb reach the
//! scheduler; everything else is dropped here, silently from the core's
//! point of view.

use crate::reset::ResetSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Re-sample the bin-empty baseline.
    Reset,
}

/// Decode a raw payload. Returns `None` for malformed JSON, non-object
/// payloads, or unknown verbs.
pub fn parse(payload: &[u8]) -> Option<Command> {
    let value: serde_json::Value = serde_json::from_slice(payload).ok()?;
    match value.get("command").and_then(|c| c.as_str()) {
        Some("reset") => Some(Command::Reset),
        _ => None,
    }
}

/// Decode a payload and apply it to the shared latch. Unknown payloads are
/// dropped before the latch is touched.
pub fn dispatch(payload: &[u8], reset: &ResetSignal) {
    match parse(payload) {
        Some(Command::Reset) => {
            tracing::info!("remote reset command received");
            reset.request_reset();
        }
        None => {
            tracing::debug!(len = payload.len(), "unrecognized payload dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_command_parses() {
        assert_eq!(parse(br#"{"command":"reset"}"#), Some(Command::Reset));
    }

    #[test]
    fn extra_fields_are_tolerated() {
        assert_eq!(
            parse(br#"{"command":"reset","origin":"console"}"#),
            Some(Command::Reset)
        );
    }

    #[test]
    fn unknown_verbs_are_dropped() {
        assert_eq!(parse(br#"{"command":"selfdestruct"}"#), None);
    }

    #[test]
    fn unrelated_payloads_are_dropped() {
        assert_eq!(parse(br#"{"percentage":88.0}"#), None);
        assert_eq!(parse(br#"[1,2,3]"#), None);
        assert_eq!(parse(br#""reset""#), None);
    }

    #[test]
    fn malformed_json_is_dropped() {
        assert_eq!(parse(b"{not json"), None);
        assert_eq!(parse(b""), None);
        assert_eq!(parse(&[0xff, 0xfe]), None);
    }

    #[test]
    fn dispatch_sets_the_latch_only_for_reset() {
        let reset = ResetSignal::new();
        dispatch(br#"{"percentage":12}"#, &reset);
        assert!(!reset.take_if_pending());
        dispatch(br#"{"command":"reset"}"#, &reset);
        assert!(reset.take_if_pending());
    }
}
