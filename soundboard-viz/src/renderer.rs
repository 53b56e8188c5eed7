use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::bar_geometry::BarGeometry;
use crate::config::{RenderConfig, IDLE_LABEL};
use crate::errors::{AttachError, SampleError};
use crate::peak_animator::PeakAnimator;
use crate::sampling::SamplingSource;
use crate::scheduler::{ContainerObserver, FrameHandle, FrameScheduler, ObserverId};
use crate::surface::RasterSurface;
use crate::types::BinState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// No frame requested, no resize observation.
    Detached,
    /// A frame is requested (or being painted) and the container is observed.
    Attached,
}

/// Everything that only exists while attached.
struct Session<Src, Surf> {
    source: Src,
    surface: Surf,
    /// Reused for every pull.
    snapshot: Vec<u8>,
    pending_frame: Option<FrameHandle>,
    observer: ObserverId,
}

/// Draws a live spectrum as bars with lingering peak caps.
///
/// Attaching binds a sampling source and a surface, sizes the surface to the
/// container and requests a frame. Every frame the host delivers back through
/// [`on_frame`](Self::on_frame) pulls one snapshot, advances the bars, repaints the
/// whole surface and requests the next frame. Detaching (or dropping the renderer)
/// withdraws the pending request; frames delivered after that are ignored.
pub struct SpectrumPeakRenderer<Src, Surf, F, C>
where
    Src: SamplingSource,
    Surf: RasterSurface,
    F: FrameScheduler,
    C: ContainerObserver,
{
    config: RenderConfig,
    scheduler: F,
    container: C,
    animator: PeakAnimator,
    session: Option<Session<Src, Surf>>,
    label: String,
    frames_painted: u64,
}

impl<Src, Surf, F, C> SpectrumPeakRenderer<Src, Surf, F, C>
where
    Src: SamplingSource,
    Surf: RasterSurface,
    F: FrameScheduler,
    C: ContainerObserver,
{
    /// Creates a detached renderer.
    ///
    /// # Arguments
    ///
    /// * `config` - Decay, geometry and colors, fixed for the renderer's lifetime.
    /// * `scheduler` - Display refresh clock used to request frames.
    /// * `container` - Element whose client box the surface is sized to.
    pub fn new(config: RenderConfig, scheduler: F, container: C) -> Self {
        Self {
            animator: PeakAnimator::new(0, &config),
            config,
            scheduler,
            container,
            session: None,
            label: IDLE_LABEL.to_string(),
            frames_painted: 0,
        }
    }

    /// Starts drawing `source` into `surface`.
    ///
    /// Any previous session is detached first, so at most one frame request is ever
    /// outstanding. Passing no source is how a host removes it: the old loop stops and
    /// `SourceUnavailable` is returned. A missing surface, or a source without bins,
    /// also leaves the renderer detached with nothing scheduled.
    ///
    /// # Arguments
    ///
    /// * `source` - Where snapshots are pulled from on every frame.
    /// * `surface` - Raster the bars are painted into; resized to the container.
    pub fn attach(&mut self, source: Option<Src>, surface: Option<Surf>) -> Result<(), AttachError> {
        self.detach();

        let source = source.ok_or(AttachError::SourceUnavailable)?;
        let mut surface = surface.ok_or(AttachError::SurfaceUnavailable)?;
        let num_bins = source.bin_count();
        if num_bins == 0 {
            return Err(AttachError::NoBins);
        }

        self.frames_painted = 0;
        let size = self.container.client_size();
        surface.resize(size);
        let observer = self.container.observe();
        self.animator.reset(num_bins);
        let pending_frame = Some(self.scheduler.request_frame());

        viz_debug!(
            "attached: {} bins on a {}x{} surface",
            num_bins,
            size.width,
            size.height
        );
        self.session = Some(Session {
            source,
            surface,
            snapshot: vec![0; num_bins],
            pending_frame,
            observer,
        });
        Ok(())
    }

    /// Stops drawing and hands back the source and surface. Does nothing when detached.
    pub fn detach(&mut self) -> Option<(Src, Surf)> {
        let session = self.session.take()?;
        if let Some(handle) = session.pending_frame {
            self.scheduler.cancel_frame(handle);
        }
        self.container.unobserve(session.observer);
        self.animator.reset(0);
        viz_debug!("detached after {} frames", self.frames_painted);
        Some((session.source, session.surface))
    }

    /// Runs one frame if `handle` is the frame this renderer is waiting for.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.pending_frame != Some(handle) {
            return;
        }
        session.pending_frame = None;

        // A shared source that is borrowed elsewhere reports no bins for the moment.
        let num_bins = session.source.bin_count();
        if num_bins != 0 && num_bins != session.snapshot.len() {
            viz_debug!(
                "source bin count changed from {} to {}",
                session.snapshot.len(),
                num_bins
            );
            session.snapshot = vec![0; num_bins];
        }
        match session.source.sample_into(&mut session.snapshot) {
            Err(SampleError::Busy) => {
                viz_debug!("sampling source busy, skipping frame");
                session.pending_frame = Some(self.scheduler.request_frame());
                return;
            }
            Err(_) => {
                viz_warn!("sampling source went away, detaching");
                self.detach();
                return;
            }
            Ok(()) if num_bins == 0 => {
                viz_warn!("sampling source has no bins, detaching");
                self.detach();
                return;
            }
            Ok(()) => {}
        }

        paint_frame(&self.config, &mut self.animator, session);
        self.frames_painted = self.frames_painted.wrapping_add(1);
        session.pending_frame = Some(self.scheduler.request_frame());
    }

    /// Re-fits the surface to the container's client box. Ignored while detached.
    pub fn on_resize(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let size = self.container.client_size();
            viz_debug!("container resized to {}x{}", size.width, size.height);
            session.surface.resize(size);
        }
    }

    pub fn state(&self) -> RendererState {
        if self.session.is_some() {
            RendererState::Attached
        } else {
            RendererState::Detached
        }
    }

    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    /// Bar and peak heights after the last frame; empty while detached.
    pub fn bins(&self) -> &[BinState] {
        self.animator.bins()
    }

    /// The frame request this renderer is waiting on, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.session.as_ref().and_then(|s| s.pending_frame)
    }

    /// Frames painted since the last successful attach.
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Src> {
        self.session.as_ref().map(|s| &s.source)
    }

    /// Lets the host keep feeding an owned source between frames.
    pub fn source_mut(&mut self) -> Option<&mut Src> {
        self.session.as_mut().map(|s| &mut s.source)
    }

    /// The surface being painted, while attached.
    pub fn surface(&self) -> Option<&Surf> {
        self.session.as_ref().map(|s| &s.surface)
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Text shown next to the visualization, typically the clip that is playing.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn clear_label(&mut self) {
        self.label = IDLE_LABEL.to_string();
    }
}

impl<Src, Surf, F, C> Drop for SpectrumPeakRenderer<Src, Surf, F, C>
where
    Src: SamplingSource,
    Surf: RasterSurface,
    F: FrameScheduler,
    C: ContainerObserver,
{
    fn drop(&mut self) {
        self.detach();
    }
}

fn paint_frame<Src, Surf: RasterSurface>(
    config: &RenderConfig,
    animator: &mut PeakAnimator,
    session: &mut Session<Src, Surf>,
) {
    let surface = &mut session.surface;
    let width = surface.width();
    let height = surface.height();
    let h = height as f32;

    // Opaque fill rather than a transparent clear, so nothing ghosts through.
    surface.fill_rect(
        Rectangle::new(Point::zero(), Size::new(width, height)),
        config.background,
    );

    let geometry = BarGeometry::new(config.layout, width, session.snapshot.len(), config.gutter);
    let bins = animator.update_and_get_bins(&session.snapshot, h);
    let ramp = config.bar_ramp;

    for (i, bin) in bins.iter().enumerate() {
        let bar_top = (h - bin.current_height).floor().max(0.0) as i32;
        let bar_height = (height as i32 - bar_top).max(0) as u32;
        let cap_top = (h - bin.peak_height - config.peak_cap_height as f32).floor() as i32;

        for column in geometry.columns(i) {
            if bar_height > 0 {
                surface.fill_vertical_gradient(
                    Rectangle::new(
                        Point::new(column.x, bar_top),
                        Size::new(column.width, bar_height),
                    ),
                    ramp.top,
                    ramp.bottom,
                );
            }
            if bin.peak_height > 0.0 {
                surface.fill_rect(
                    Rectangle::new(
                        Point::new(column.x, cap_top),
                        Size::new(column.width, config.peak_cap_height),
                    ),
                    config.peak_cap_color,
                );
            }
        }
    }
}
