use embedded_graphics::pixelcolor::Rgb888;

use crate::bar_geometry::BarLayout;
use crate::color_strategy::{ColorRamp, ColorStop};

// --- Display Config ---
pub const BACKGROUND: Rgb888 = Rgb888::new(0x22, 0x22, 0x22); // Opaque, cleared every frame
pub const PEAK_CAP_COLOR: Rgb888 = Rgb888::new(0xff, 0x5c, 0xc1);
pub const BAR_TOP_COLOR: Rgb888 = Rgb888::new(0x00, 0xff, 0x00); // lime
pub const BAR_BASE_COLOR: Rgb888 = Rgb888::new(0x00, 0x80, 0x00); // green
pub const PEAK_CAP_HEIGHT: u32 = 4; // px
pub const BAR_GUTTER: u32 = 2; // px between neighbouring bars

// --- Decay Config (magnitude units, 0..=255, scaled to the surface height) ---
pub const BAR_DECAY: f32 = 4.0;
pub const PEAK_DECAY: f32 = 1.5;
pub const PEAK_HOLD_TICKS: u32 = 0;

// --- Label ---
pub const IDLE_LABEL: &str = "Ready!";

/// Per-session rendering constants. Fixed once a renderer has been built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// How far a falling bar drops per tick, in magnitude units.
    pub bar_decay: f32,
    /// How far a peak cap drops per tick, in magnitude units. Normally below `bar_decay`.
    pub peak_decay: f32,
    /// Ticks a fresh peak stays put before it starts to fall.
    pub peak_hold_ticks: u32,
    pub peak_cap_height: u32,
    pub gutter: u32,
    pub layout: BarLayout,
    pub background: Rgb888,
    pub bar_ramp: ColorRamp,
    pub peak_cap_color: Rgb888,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bar_decay: BAR_DECAY,
            peak_decay: PEAK_DECAY,
            peak_hold_ticks: PEAK_HOLD_TICKS,
            peak_cap_height: PEAK_CAP_HEIGHT,
            gutter: BAR_GUTTER,
            layout: BarLayout::Mirrored,
            background: BACKGROUND,
            bar_ramp: ColorRamp::new(
                ColorStop::opaque(BAR_TOP_COLOR),
                ColorStop::transparent(BAR_BASE_COLOR),
            ),
            peak_cap_color: PEAK_CAP_COLOR,
        }
    }
}

impl RenderConfig {
    /// Sets the per-tick fall of bars and peak caps in magnitude units. Negative
    /// values are clamped to zero.
    pub fn with_decay(mut self, bar_decay: f32, peak_decay: f32) -> Self {
        self.bar_decay = bar_decay.max(0.0);
        self.peak_decay = peak_decay.max(0.0);
        self
    }

    /// Frames a fresh peak holds before it starts to fall.
    pub fn with_peak_hold(mut self, ticks: u32) -> Self {
        self.peak_hold_ticks = ticks;
        self
    }

    /// Mirrored around the center, or left-to-right.
    pub fn with_layout(mut self, layout: BarLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Empty pixels between neighbouring bars.
    pub fn with_gutter(mut self, gutter: u32) -> Self {
        self.gutter = gutter;
        self
    }

    /// Thickness of the peak cap in pixels.
    pub fn with_peak_cap_height(mut self, height: u32) -> Self {
        self.peak_cap_height = height;
        self
    }

    /// Replaces the background fill, the bar gradient and the cap color together.
    pub fn with_colors(mut self, background: Rgb888, bar_ramp: ColorRamp, peak_cap: Rgb888) -> Self {
        self.background = background;
        self.bar_ramp = bar_ramp;
        self.peak_cap_color = peak_cap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_peak_falls_slower_than_bar() {
        let config = RenderConfig::default();
        assert!(config.peak_decay < config.bar_decay);
        assert_eq!(config.layout, BarLayout::Mirrored);
        assert_eq!(config.bar_ramp.bottom.alpha, 0);
    }

    #[test]
    fn test_negative_decay_clamped() {
        let config = RenderConfig::default().with_decay(-1.0, -2.0);
        assert_eq!(config.bar_decay, 0.0);
        assert_eq!(config.peak_decay, 0.0);
    }
}
