//! Fill-level arithmetic.
//!
//! Distance shrinks as the bin fills, so the level is the relative loss of
//! distance against the bin-empty baseline. Clamping absorbs sensor jitter
//! (current > baseline) and baseline drift.

/// Map (baseline, current) distances to a fill percentage in [0, 100].
///
/// Policy: any unknown input — absent reading, non-positive baseline, or a
/// non-finite intermediate — reports as 0 ("no fill data"), never as an
/// error visible to downstream consumers.
pub fn fill_percentage(baseline: Option<f32>, current: Option<f32>) -> f32 {
    let (Some(baseline), Some(current)) = (baseline, current) else {
        return 0.0;
    };
    if !(baseline > 0.0) || !current.is_finite() {
        return 0.0;
    }
    let raw = (baseline - current) / baseline * 100.0;
    if !raw.is_finite() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::fill_percentage;

    #[test]
    fn half_full_bin() {
        assert_eq!(fill_percentage(Some(100.0), Some(40.0)), 60.0);
    }

    #[test]
    fn sensor_overshoot_clamps_to_empty() {
        // current > baseline happens on jitter; report empty, not negative.
        assert_eq!(fill_percentage(Some(100.0), Some(150.0)), 0.0);
    }

    #[test]
    fn garbage_at_sensor_clamps_to_full() {
        assert_eq!(fill_percentage(Some(100.0), Some(-5.0)), 100.0);
    }

    #[test]
    fn unknown_inputs_report_empty() {
        assert_eq!(fill_percentage(None, Some(40.0)), 0.0);
        assert_eq!(fill_percentage(Some(100.0), None), 0.0);
        assert_eq!(fill_percentage(None, None), 0.0);
    }

    #[test]
    fn degenerate_baselines_report_empty() {
        assert_eq!(fill_percentage(Some(0.0), Some(40.0)), 0.0);
        assert_eq!(fill_percentage(Some(-10.0), Some(40.0)), 0.0);
        assert_eq!(fill_percentage(Some(f32::NAN), Some(40.0)), 0.0);
        assert_eq!(fill_percentage(Some(100.0), Some(f32::NAN)), 0.0);
        assert_eq!(fill_percentage(Some(f32::INFINITY), Some(40.0)), 0.0);
    }
}
