//! Common time/period helpers.

/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u64 = 1_000_000;
/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Compute the period in microseconds for a given tick rate in Hz.
/// - Clamps `hz` to at least 1 to avoid division by zero.
/// - Ensures result is at least 1 microsecond.
#[inline]
pub fn period_us(hz: u32) -> u64 {
    (MICROS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Compute the period in milliseconds for a given tick rate in Hz.
/// - Clamps `hz` to at least 1 to avoid division by zero.
/// - Ensures result is at least 1 millisecond.
#[inline]
pub fn period_ms(hz: u32) -> u64 {
    (MILLIS_PER_SEC / u64::from(hz.max(1))).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_hertz_is_a_hundred_millis() {
        assert_eq!(period_ms(10), 100);
        assert_eq!(period_us(10), 100_000);
    }

    #[test]
    fn zero_rate_is_clamped() {
        assert_eq!(period_ms(0), 1_000);
        assert_eq!(period_us(0), 1_000_000);
    }

    #[test]
    fn very_fast_rates_floor_at_one() {
        assert_eq!(period_ms(100_000), 1);
        assert_eq!(period_us(u32::MAX), 1);
    }
}
