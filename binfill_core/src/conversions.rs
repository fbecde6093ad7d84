//! From impls mapping the TOML config schema onto core types.

use crate::TimingCfg;
use crate::display::DisplayPresenter;

impl From<&binfill_config::TimingCfg> for TimingCfg {
    fn from(cfg: &binfill_config::TimingCfg) -> Self {
        Self {
            cooldown_ms: cfg.cooldown_ms,
            settle_delay_ms: cfg.settle_delay_ms,
        }
    }
}

impl From<&binfill_config::DisplayCfg> for DisplayPresenter {
    fn from(cfg: &binfill_config::DisplayCfg) -> Self {
        Self::new(cfg.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_maps_field_for_field() {
        let cfg = binfill_config::TimingCfg {
            tick_hz: 20,
            settle_delay_ms: 123,
            cooldown_ms: 456,
        };
        let core: TimingCfg = (&cfg).into();
        assert_eq!(core.settle_delay_ms, 123);
        assert_eq!(core.cooldown_ms, 456);
    }

    #[test]
    fn presenter_takes_display_width() {
        let cfg = binfill_config::DisplayCfg { width: 20 };
        let presenter: DisplayPresenter = (&cfg).into();
        assert_eq!(presenter.width(), 20);
    }
}
