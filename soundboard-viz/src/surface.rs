use alloc::{vec, vec::Vec};
use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb888,
    primitives::Rectangle,
    Pixel,
};

use crate::color_strategy::{ColorRamp, ColorStop};

/// A 2D target the renderer paints into, sized in device pixels.
///
/// Painting never fails; anything outside the surface is clipped.
pub trait RasterSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Matches the surface to its container. Content after a resize is unspecified
    /// until the next full repaint.
    fn resize(&mut self, size: Size);

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888);

    /// Two-stop linear gradient along the vertical axis, `top` on the first row of
    /// `area` and `bottom` on the last.
    fn fill_vertical_gradient(&mut self, area: Rectangle, top: ColorStop, bottom: ColorStop);
}

impl<S: RasterSurface + ?Sized> RasterSurface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn resize(&mut self, size: Size) {
        (**self).resize(size)
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888) {
        (**self).fill_rect(area, color)
    }

    fn fill_vertical_gradient(&mut self, area: Rectangle, top: ColorStop, bottom: ColorStop) {
        (**self).fill_vertical_gradient(area, top, bottom)
    }
}

/// Heap-backed `Rgb888` pixel grid.
///
/// Gradient stops are alpha-composited over whatever is already in the buffer. It is
/// also an embedded-graphics [`DrawTarget`], so text and other primitives can be drawn
/// on top of a rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl FrameBuffer {
    /// Allocates a buffer cleared to black.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb888::new(0, 0, 0); (size.width * size.height) as usize],
        }
    }

    /// Color at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point).map(|i| self.pixels[i])
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    fn clip(&self, area: &Rectangle) -> Rectangle {
        Rectangle::new(Point::zero(), self.size).intersection(area)
    }
}

impl RasterSurface for FrameBuffer {
    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
    }

    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.pixels.clear();
        self.pixels
            .resize((size.width * size.height) as usize, Rgb888::new(0, 0, 0));
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888) {
        let clipped = self.clip(&area);
        let width = self.size.width as usize;
        for y in clipped.rows() {
            let row = y as usize * width;
            for x in clipped.columns() {
                self.pixels[row + x as usize] = color;
            }
        }
    }

    fn fill_vertical_gradient(&mut self, area: Rectangle, top: ColorStop, bottom: ColorStop) {
        let ramp = ColorRamp::new(top, bottom);
        let span = area.size.height.saturating_sub(1).max(1) as f32;
        let clipped = self.clip(&area);
        let width = self.size.width as usize;
        for y in clipped.rows() {
            let stop = ramp.at((y - area.top_left.y) as f32 / span);
            let row = y as usize * width;
            for x in clipped.columns() {
                let pixel = &mut self.pixels[row + x as usize];
                *pixel = stop.over(*pixel);
            }
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}
