use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

/// A color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStop {
    pub color: Rgb888,
    pub alpha: u8,
}

impl ColorStop {
    pub const fn new(color: Rgb888, alpha: u8) -> Self {
        Self { color, alpha }
    }

    pub const fn opaque(color: Rgb888) -> Self {
        Self::new(color, 255)
    }

    pub const fn transparent(color: Rgb888) -> Self {
        Self::new(color, 0)
    }

    /// Composites this stop over an opaque `background` pixel.
    pub fn over(&self, background: Rgb888) -> Rgb888 {
        let a = self.alpha as u16;
        let mix = |fg: u8, bg: u8| ((fg as u16 * a + bg as u16 * (255 - a) + 127) / 255) as u8;
        Rgb888::new(
            mix(self.color.r(), background.r()),
            mix(self.color.g(), background.g()),
            mix(self.color.b(), background.b()),
        )
    }
}

/// Two-stop vertical gradient: `top` at the bar's top edge, `bottom` at the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRamp {
    pub top: ColorStop,
    pub bottom: ColorStop,
}

impl ColorRamp {
    pub const fn new(top: ColorStop, bottom: ColorStop) -> Self {
        Self { top, bottom }
    }

    /// Linear interpolation between the stops, `t = 0` at the top and `t = 1` at the bottom.
    pub fn at(&self, t: f32) -> ColorStop {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t + 0.5) as u8;
        ColorStop::new(
            Rgb888::new(
                lerp(self.top.color.r(), self.bottom.color.r()),
                lerp(self.top.color.g(), self.bottom.color.g()),
                lerp(self.top.color.b(), self.bottom.color.b()),
            ),
            lerp(self.top.alpha, self.bottom.alpha),
        )
    }
}
