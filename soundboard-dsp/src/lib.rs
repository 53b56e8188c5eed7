#![no_std]
extern crate alloc;

use microdsp::common::{apply_window_function, WindowFunctionType::Hann};

mod analyser;
mod errors;

pub use analyser::{AnalyserConfig, ByteFrequencyAnalyser, WindowKind};
pub use errors::AnalyserError;

/// FFT sizes the analyser accepts, smallest first.
pub const VALID_FFT_SIZES: [usize; 7] = [32, 64, 128, 256, 512, 1024, 2048];

/// FFT size the soundboard analyser runs at, giving 32 frequency bins.
pub const DEFAULT_FFT_SIZE: usize = 64;
pub const DEFAULT_SMOOTHING_TIME_CONSTANT: f32 = 0.8;
pub const DEFAULT_MIN_DECIBELS: f32 = -100.0;
pub const DEFAULT_MAX_DECIBELS: f32 = -30.0;

pub fn is_valid_fft_size(value: usize) -> bool {
    VALID_FFT_SIZES.contains(&value)
}

/// Normalize a single sample from i16 to f32.
pub fn normalize_sample(sample: i16) -> f32 {
    sample as f32 / i16::MAX as f32
}

/// Normalize a slice of i16 samples to a slice of f32 samples.
///
/// Only `min(samples.len(), normalized_samples.len())` values are written.
pub fn normalize_samples(samples: &[i16], normalized_samples: &mut [f32]) {
    for (out, &sample) in normalized_samples.iter_mut().zip(samples) {
        *out = normalize_sample(sample);
    }
}

/// Apply a Hann window to a slice of f32 samples.
pub fn apply_hann_window(samples: &mut [f32]) {
    apply_window_function(Hann, samples);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sample_extremes() {
        assert_eq!(normalize_sample(0), 0.0);
        assert_eq!(normalize_sample(i16::MAX), 1.0);
        assert!(normalize_sample(i16::MIN) < -1.0 + 1e-4);
    }

    #[test]
    fn test_normalize_samples_shorter_output() {
        let samples = [i16::MAX, 0, i16::MAX];
        let mut out = [9.0f32; 2];
        normalize_samples(&samples, &mut out);
        assert_eq!(out, [1.0, 0.0]);
    }

    #[test]
    fn test_fft_size_validation() {
        assert!(is_valid_fft_size(DEFAULT_FFT_SIZE));
        assert!(is_valid_fft_size(2048));
        assert!(!is_valid_fft_size(48));
        assert!(!is_valid_fft_size(4096));
    }
}
