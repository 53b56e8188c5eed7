use alloc::{vec, vec::Vec};
use core::f32::consts::PI;

use microfft::{real, Complex32};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::{
    apply_hann_window, is_valid_fft_size, normalize_sample, AnalyserError, DEFAULT_FFT_SIZE,
    DEFAULT_MAX_DECIBELS, DEFAULT_MIN_DECIBELS, DEFAULT_SMOOTHING_TIME_CONSTANT,
};

/// Window applied to the time-domain frame before the FFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Blackman window (a = 0.16), matching a browser analyser node.
    Blackman,
    Hann,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyserConfig {
    pub fft_size: usize,
    /// Weight of the previous frame in `[0, 1]`; 0 disables temporal smoothing.
    pub smoothing_time_constant: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
    pub window: WindowKind,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            smoothing_time_constant: DEFAULT_SMOOTHING_TIME_CONSTANT,
            min_decibels: DEFAULT_MIN_DECIBELS,
            max_decibels: DEFAULT_MAX_DECIBELS,
            window: WindowKind::Blackman,
        }
    }
}

impl AnalyserConfig {
    pub fn with_fft_size(mut self, fft_size: usize) -> Self {
        self.fft_size = fft_size;
        self
    }

    pub fn with_smoothing(mut self, smoothing_time_constant: f32) -> Self {
        self.smoothing_time_constant = smoothing_time_constant;
        self
    }

    pub fn with_decibel_range(mut self, min_decibels: f32, max_decibels: f32) -> Self {
        self.min_decibels = min_decibels;
        self.max_decibels = max_decibels;
        self
    }

    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    pub fn validate(&self) -> Result<(), AnalyserError> {
        if !is_valid_fft_size(self.fft_size) {
            return Err(AnalyserError::UnsupportedFftSize(self.fft_size));
        }
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(AnalyserError::SmoothingOutOfRange(
                self.smoothing_time_constant,
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(AnalyserError::EmptyDecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        Ok(())
    }
}

/// Turns a stream of mono samples into 0..=255 magnitude snapshots, one byte per
/// frequency bin, the way the soundboard's audio graph fed its visualizer.
///
/// Samples are pushed as they are played; snapshots are pulled on demand and always
/// describe the latest `fft_size` samples. All buffers are allocated once in `new`.
pub struct ByteFrequencyAnalyser {
    config: AnalyserConfig,
    /// Ring of the most recent `fft_size` samples.
    time_domain: Vec<f32>,
    write_pos: usize,
    /// Precomputed Blackman coefficients; empty when the Hann window is used.
    window: Vec<f32>,
    frame: Vec<f32>,
    smoothed: Vec<f32>,
}

impl ByteFrequencyAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self, AnalyserError> {
        config.validate()?;
        let n = config.fft_size;
        let window = match config.window {
            WindowKind::Blackman => blackman_window(n),
            WindowKind::Hann => Vec::new(),
        };
        Ok(Self {
            config,
            time_domain: vec![0.0; n],
            write_pos: 0,
            window,
            frame: vec![0.0; n],
            smoothed: vec![0.0; n / 2],
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.config.fft_size / 2
    }

    /// Appends mono samples in `[-1, 1]`. Only the latest `fft_size` samples are kept.
    pub fn push_samples(&mut self, samples: &[f32]) {
        let n = self.time_domain.len();
        for &sample in samples {
            self.time_domain[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % n;
        }
    }

    pub fn push_i16_samples(&mut self, samples: &[i16]) {
        let n = self.time_domain.len();
        for &sample in samples {
            self.time_domain[self.write_pos] = normalize_sample(sample);
            self.write_pos = (self.write_pos + 1) % n;
        }
    }

    /// Drops buffered samples and smoothing history.
    pub fn reset(&mut self) {
        self.time_domain.fill(0.0);
        self.smoothed.fill(0.0);
        self.write_pos = 0;
    }

    /// Writes `min(out.len(), frequency_bin_count())` bytes of the current spectrum.
    pub fn get_byte_frequency_data(&mut self, out: &mut [u8]) -> Result<(), AnalyserError> {
        let n = self.time_domain.len();

        // Oldest sample first.
        for (i, slot) in self.frame.iter_mut().enumerate() {
            *slot = self.time_domain[(self.write_pos + i) % n];
        }
        match self.config.window {
            WindowKind::Blackman => {
                for (slot, w) in self.frame.iter_mut().zip(&self.window) {
                    *slot *= w;
                }
            }
            WindowKind::Hann => apply_hann_window(&mut self.frame),
        }

        let spectrum = real_fft(&mut self.frame)?;
        let tau = self.config.smoothing_time_constant;
        let scale = 1.0 / n as f32;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let c = spectrum[k];
            // The real FFT packs the Nyquist term into the imaginary part of bin 0.
            let magnitude = scale
                * if k == 0 {
                    c.re.abs()
                } else {
                    (c.re * c.re + c.im * c.im).sqrt()
                };
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
        }

        let min_db = self.config.min_decibels;
        let range_scale = 255.0 / (self.config.max_decibels - min_db);
        for (byte, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            *byte = magnitude_to_byte(magnitude, min_db, range_scale);
        }
        Ok(())
    }
}

fn magnitude_to_byte(magnitude: f32, min_db: f32, range_scale: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    (range_scale * (db - min_db)).clamp(0.0, 255.0) as u8
}

fn blackman_window(n: usize) -> Vec<f32> {
    const ALPHA: f32 = 0.16;
    let a0 = 0.5 * (1.0 - ALPHA);
    let a1 = 0.5;
    let a2 = 0.5 * ALPHA;
    (0..n)
        .map(|i| {
            let x = i as f32 / n as f32;
            a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
        })
        .collect()
}

fn real_fft(frame: &mut [f32]) -> Result<&mut [Complex32], AnalyserError> {
    let len = frame.len();
    macro_rules! dispatch {
        ($($size:literal => $rfft:ident),* $(,)?) => {
            match len {
                $($size => {
                    let input: &mut [f32; $size] = frame
                        .try_into()
                        .map_err(|_| AnalyserError::UnsupportedFftSize(len))?;
                    Ok(&mut real::$rfft(input)[..])
                })*
                _ => Err(AnalyserError::UnsupportedFftSize(len)),
            }
        };
    }
    dispatch!(
        32 => rfft_32,
        64 => rfft_64,
        128 => rfft_128,
        256 => rfft_256,
        512 => rfft_512,
        1024 => rfft_1024,
        2048 => rfft_2048,
    )
}
