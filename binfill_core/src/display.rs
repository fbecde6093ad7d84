//! Fill-level presentation: proportional text bar plus a green-to-red
//! gradient. Rendering is stateless; device failures are logged and
//! swallowed because the display is not safety-critical.

use binfill_traits::{DisplayDevice, Rgb};

/// Fixed-width proportional bar, `>` for the filled span and `-` for the
/// rest. The charset matches what the original character LCD can show.
pub fn render_bar(percentage: f32, width: usize) -> String {
    let p = percentage.clamp(0.0, 100.0);
    let filled = ((width as f32) * p / 100.0) as usize;
    let filled = filled.min(width);
    let mut bar = String::with_capacity(width);
    bar.extend(std::iter::repeat_n('>', filled));
    bar.extend(std::iter::repeat_n('-', width - filled));
    bar
}

/// Linear color interpolation: 0% is fully green (safe), 100% fully red
/// (alert), no blue component.
pub fn gradient_color(percentage: f32) -> Rgb {
    let p = percentage.clamp(0.0, 100.0);
    Rgb {
        r: (255.0 * p / 100.0) as u8,
        g: (255.0 * (100.0 - p) / 100.0) as u8,
        b: 0,
    }
}

#[derive(Debug, Clone)]
pub struct DisplayPresenter {
    width: usize,
}

impl DisplayPresenter {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render the level on the device. Failures are logged and swallowed.
    pub fn present(&self, device: &mut dyn DisplayDevice, percentage: f32) {
        let p = percentage.clamp(0.0, 100.0);
        let bar = render_bar(p, self.width);
        let color = gradient_color(p);
        if let Err(e) = device.render(p as u8, &bar, color) {
            tracing::warn!(error = %e, "display render failed");
        }
    }
}
