#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "logging")]
use defmt_rtt as _;

/// Debug-level log line routed to defmt (`logging`) or the `log` facade (`std`).
macro_rules! viz_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        defmt::debug!($($arg)*);
        #[cfg(feature = "std")]
        log::debug!($($arg)*);
        #[cfg(not(any(feature = "logging", feature = "std")))]
        {
            let _ = core::format_args!($($arg)*);
        }
    }};
}

macro_rules! viz_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        defmt::warn!($($arg)*);
        #[cfg(feature = "std")]
        log::warn!($($arg)*);
        #[cfg(not(any(feature = "logging", feature = "std")))]
        {
            let _ = core::format_args!($($arg)*);
        }
    }};
}

pub mod bar_geometry;
pub mod color_strategy;
pub mod config;
pub mod errors;
pub mod peak_animator;
pub mod renderer;
pub mod sampling;
pub mod scheduler;
pub mod surface;
pub mod types;

pub use bar_geometry::{BarLayout, BarSlot};
pub use color_strategy::{ColorRamp, ColorStop};
pub use config::RenderConfig;
pub use errors::{AttachError, SampleError};
pub use peak_animator::PeakAnimator;
pub use renderer::{RendererState, SpectrumPeakRenderer};
pub use sampling::SamplingSource;
pub use scheduler::{
    ContainerObserver, FixedContainer, FrameHandle, FrameScheduler, ManualFrameClock, ObserverId,
};
pub use surface::{FrameBuffer, RasterSurface};
pub use types::{BinState, FrequencySnapshot};
