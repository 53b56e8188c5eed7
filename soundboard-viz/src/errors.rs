use thiserror::Error;

/// Why an attach request scheduled nothing. The renderer stays detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("no sampling source to attach")]
    SourceUnavailable,

    #[error("no raster surface to draw into")]
    SurfaceUnavailable,

    #[error("sampling source reports zero frequency bins")]
    NoBins,
}

/// A snapshot could not be pulled. The renderer treats every variant as the
/// source having gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("sampling source has been dropped")]
    Disconnected,

    #[error("sampling source is borrowed elsewhere")]
    Busy,

    #[error("analyser failed to produce a spectrum")]
    Analyser,
}
