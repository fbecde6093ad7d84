use std::time::{Duration, Instant};
use std::{fs, io::Write, path::Path};

use crate::error::{HwError, Result};

/// Replace `path` with `bytes` through a temp file and rename, so a reader
/// never observes a half-written record. Last write wins.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    fs::rename(tmp, path)
}

/// Busy-wait (with short sleeps) until `level` returns true or the timeout
/// expires. Returns the elapsed time on success.
pub fn wait_for_level(
    mut level: impl FnMut() -> bool,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Duration> {
    let start = Instant::now();
    let deadline = start + timeout;
    while !level() {
        if Instant::now() >= deadline {
            return Err(HwError::EchoTimeout);
        }
        std::thread::sleep(poll_interval);
    }
    Ok(start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_succeeds_once_the_level_flips() {
        let mut calls = 0;
        let elapsed = wait_for_level(
            || {
                calls += 1;
                calls > 3
            },
            Duration::from_millis(500),
            Duration::from_micros(10),
        )
        .expect("level flips");
        assert!(elapsed < Duration::from_millis(500));
    }

    #[test]
    fn wait_times_out_on_a_stuck_line() {
        let err = wait_for_level(
            || false,
            Duration::from_millis(20),
            Duration::from_micros(100),
        )
        .expect_err("must time out");
        assert!(matches!(err, HwError::EchoTimeout));
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        // No temp file left behind.
        assert!(!path.with_extension("tmp").exists());
    }
}
