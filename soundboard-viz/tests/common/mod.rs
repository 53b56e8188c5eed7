#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::{geometry::Size, pixelcolor::Rgb888, primitives::Rectangle};
use soundboard_viz::{
    ColorStop, FixedContainer, ManualFrameClock, RasterSurface, RenderConfig, SampleError,
    SamplingSource, SpectrumPeakRenderer,
};

/// Every draw call a [`RecordingSurface`] received.
#[derive(Debug, Default)]
pub struct PaintLog {
    pub fills: Vec<(Rectangle, Rgb888)>,
    pub gradients: Vec<(Rectangle, ColorStop, ColorStop)>,
    pub resizes: Vec<Size>,
}

impl PaintLog {
    pub fn paint_calls(&self) -> usize {
        self.fills.len() + self.gradients.len()
    }

    pub fn clear(&mut self) {
        self.fills.clear();
        self.gradients.clear();
    }
}

/// Surface that records rectangles instead of painting pixels. The log is shared so it
/// can be read while the renderer owns the surface, and after it has given it back.
pub struct RecordingSurface {
    size: Size,
    pub log: Rc<RefCell<PaintLog>>,
}

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<PaintLog>>) {
        let log = Rc::new(RefCell::new(PaintLog::default()));
        (
            Self {
                size: Size::zero(),
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl RasterSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.log.borrow_mut().resizes.push(size);
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb888) {
        self.log.borrow_mut().fills.push((area, color));
    }

    fn fill_vertical_gradient(&mut self, area: Rectangle, top: ColorStop, bottom: ColorStop) {
        self.log.borrow_mut().gradients.push((area, top, bottom));
    }
}

/// Plays back a fixed list of snapshots, repeating the last one forever.
pub struct ScriptedSource {
    frames: Vec<Vec<u8>>,
    cursor: usize,
    /// Address of the buffer handed to every pull.
    pub buffer_addresses: Vec<usize>,
    pub fail_after: Option<usize>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Vec<u8>>) -> Self {
        assert!(!frames.is_empty());
        Self {
            frames,
            cursor: 0,
            buffer_addresses: Vec::new(),
            fail_after: None,
        }
    }

    pub fn constant(level: u8, bins: usize) -> Self {
        Self::new(vec![vec![level; bins]])
    }

    pub fn pulls(&self) -> usize {
        self.buffer_addresses.len()
    }
}

impl SamplingSource for ScriptedSource {
    fn bin_count(&self) -> usize {
        self.frames[0].len()
    }

    fn sample_into(&mut self, buffer: &mut [u8]) -> Result<(), SampleError> {
        if self.fail_after == Some(self.pulls()) {
            return Err(SampleError::Disconnected);
        }
        self.buffer_addresses.push(buffer.as_ptr() as usize);
        let frame = &self.frames[self.cursor.min(self.frames.len() - 1)];
        buffer.copy_from_slice(frame);
        self.cursor += 1;
        Ok(())
    }
}

pub type Renderer<Src> =
    SpectrumPeakRenderer<Src, RecordingSurface, ManualFrameClock, FixedContainer>;

pub fn renderer<Src: SamplingSource>(config: RenderConfig, width: u32, height: u32) -> Renderer<Src> {
    SpectrumPeakRenderer::new(
        config,
        ManualFrameClock::new(),
        FixedContainer::new(Size::new(width, height)),
    )
}

/// Fires one display refresh: every queued frame request is delivered.
pub fn step<Src: SamplingSource>(renderer: &mut Renderer<Src>) {
    for handle in renderer.scheduler_mut().take_due() {
        renderer.on_frame(handle);
    }
}

pub fn run<Src: SamplingSource>(renderer: &mut Renderer<Src>, frames: usize) {
    for _ in 0..frames {
        step(renderer);
    }
}

/// Magnitude-unit decay that moves `px` pixels per frame on a surface `height` tall.
pub fn decay_for_pixels(px: f32, height: f32) -> f32 {
    px * 255.0 / height
}
