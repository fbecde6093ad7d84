#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Inbound payloads come straight off the wire; decoding must never
    // panic, and anything that is not the reset command maps to None.
    let _ = binfill_core::command::parse(data);
});
