//! The renderer's clock and container hooks.
//!
//! A host (browser shim, simulator window, test) implements these and forwards
//! each fired frame to [`SpectrumPeakRenderer::on_frame`] and each container
//! resize to [`SpectrumPeakRenderer::on_resize`].
//!
//! [`SpectrumPeakRenderer::on_frame`]: crate::SpectrumPeakRenderer::on_frame
//! [`SpectrumPeakRenderer::on_resize`]: crate::SpectrumPeakRenderer::on_resize

use alloc::vec::Vec;

use embedded_graphics::geometry::Size;

/// Identifies one requested display frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Identifies one resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// Display-synchronized, one-shot frame callbacks.
pub trait FrameScheduler {
    /// Asks for a single callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraws a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The element the surface is laid out in.
pub trait ContainerObserver {
    /// Current client box in device pixels.
    fn client_size(&self) -> Size;

    fn observe(&mut self) -> ObserverId;

    /// Stops resize notifications. Unknown ids are ignored.
    fn unobserve(&mut self, id: ObserverId);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

impl<C: ContainerObserver + ?Sized> ContainerObserver for &mut C {
    fn client_size(&self) -> Size {
        (**self).client_size()
    }

    fn observe(&mut self) -> ObserverId {
        (**self).observe()
    }

    fn unobserve(&mut self, id: ObserverId) {
        (**self).unobserve(id)
    }
}

/// Frame scheduler driven by hand: requests queue up until the host takes them.
#[derive(Debug, Default)]
pub struct ManualFrameClock {
    next_handle: u64,
    queued: Vec<FrameHandle>,
    cancelled: usize,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests still waiting to fire.
    pub fn pending(&self) -> &[FrameHandle] {
        &self.queued
    }

    /// Number of requests withdrawn before they fired.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// Removes and returns every queued request, i.e. fires one display refresh.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        core::mem::take(&mut self.queued)
    }
}

impl FrameScheduler for ManualFrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.queued.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queued.len();
        self.queued.retain(|&queued| queued != handle);
        self.cancelled += before - self.queued.len();
    }
}

/// Container with a client size the host sets directly.
#[derive(Debug)]
pub struct FixedContainer {
    client_size: Size,
    next_id: u64,
    observers: Vec<ObserverId>,
}

impl FixedContainer {
    pub fn new(client_size: Size) -> Self {
        Self {
            client_size,
            next_id: 0,
            observers: Vec::new(),
        }
    }

    /// Changes the client box; the host then calls `on_resize` as a resize event would.
    pub fn set_client_size(&mut self, size: Size) {
        self.client_size = size;
    }

    /// Whether any resize subscription is active.
    pub fn is_observed(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Active resize subscriptions.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl ContainerObserver for FixedContainer {
    fn client_size(&self) -> Size {
        self.client_size
    }

    fn observe(&mut self) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push(id);
        id
    }

    fn unobserve(&mut self, id: ObserverId) {
        self.observers.retain(|&observer| observer != id);
    }
}
