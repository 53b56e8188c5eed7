use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnalyserError {
    #[error("unsupported fft size {0}, expected a power of two between 32 and 2048")]
    UnsupportedFftSize(usize),

    #[error("smoothing time constant {0} is outside [0, 1]")]
    SmoothingOutOfRange(f32),

    #[error("empty decibel range: min {min} dB is not below max {max} dB")]
    EmptyDecibelRange { min: f32, max: f32 },
}
